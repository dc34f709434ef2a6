//! Input form component
//!
//! Multi-line description box, a single-file image upload restricted to
//! jpg/jpeg/png, and the analyze trigger. File bytes are read as soon as a
//! file is picked so the submit handler stays synchronous.

use gloo::file::callbacks::FileReader;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys::{Event, HtmlInputElement, HtmlTextAreaElement, InputEvent};
use yew::prelude::*;

/// An uploaded image, fully read into memory.
#[derive(Clone, PartialEq)]
pub struct ImageFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// One form submission. The image, when present, takes priority over the
/// text for that submission.
#[derive(Clone, PartialEq)]
pub struct Submission {
    pub text: String,
    pub image: Option<ImageFile>,
}

#[derive(Properties, PartialEq)]
pub struct AnalyzeFormProps {
    pub on_submit: Callback<Submission>,
    /// Validation message shown next to the inputs
    #[prop_or_default]
    pub error: Option<String>,
    /// Disables the trigger while a request is in flight
    #[prop_or_default]
    pub busy: bool,
}

#[function_component(AnalyzeForm)]
pub fn analyze_form(props: &AnalyzeFormProps) -> Html {
    let text = use_state(String::new);
    let image = use_state(|| Option::<ImageFile>::None);
    // Keeps the in-flight read alive; dropping it would cancel the read
    let reader: Rc<RefCell<Option<FileReader>>> = use_mut_ref(|| None);

    let on_text_input = {
        let text = text.clone();
        Callback::from(move |e: InputEvent| {
            let area: HtmlTextAreaElement = e.target_unchecked_into();
            text.set(area.value());
        })
    };

    let on_file_change = {
        let image = image.clone();
        let reader = reader.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let file = input.files().and_then(|list| list.get(0));

            let Some(file) = file else {
                image.set(None);
                return;
            };

            let name = file.name();
            let image = image.clone();
            let task = gloo::file::callbacks::read_as_bytes(
                &gloo::file::File::from(file),
                move |result| {
                    if let Ok(bytes) = result {
                        image.set(Some(ImageFile { name, bytes }));
                    }
                },
            );
            *reader.borrow_mut() = Some(task);
        })
    };

    let on_click = {
        let text = text.clone();
        let image = image.clone();
        let on_submit = props.on_submit.clone();
        Callback::from(move |_| {
            on_submit.emit(Submission {
                text: (*text).clone(),
                image: (*image).clone(),
            });
        })
    };

    html! {
        <div class="analyze-form">
            <h2>{ "Provide Input for Analysis:" }</h2>
            <textarea
                placeholder="Enter a description of an industrial practice or scene"
                value={(*text).clone()}
                oninput={on_text_input}
            />
            <label>
                { "Or upload an image of the industrial scene:" }
                <input
                    type="file"
                    accept=".jpg,.jpeg,.png"
                    onchange={on_file_change}
                />
            </label>
            if let Some(file) = &*image {
                <p class="selected-file">{ format!("Selected: {}", file.name) }</p>
            }
            if let Some(error) = &props.error {
                <p class="input-error">{ error }</p>
            }
            <button onclick={on_click} disabled={props.busy}>
                { "Analyze Input" }
            </button>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submission_carries_both_inputs() {
        let submission = Submission {
            text: "ignored".to_string(),
            image: Some(ImageFile {
                name: "scene.png".to_string(),
                bytes: vec![1, 2, 3],
            }),
        };

        assert_eq!(submission.text, "ignored");
        assert_eq!(submission.image.as_ref().unwrap().name, "scene.png");
    }
}
