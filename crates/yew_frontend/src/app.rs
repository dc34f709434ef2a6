//! Main application component
//!
//! Owns the submission state machine: Idle until the first submission,
//! Awaiting while the one analysis request is in flight, Shown once the
//! server answers. A new submission restarts at Awaiting. An uploaded image
//! always wins over entered text.

use base64::{engine::general_purpose, Engine as _};
use serde::{Deserialize, Serialize};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::components::analyze_form::{AnalyzeForm, Submission};
use crate::components::results::{
    image_data_url, AnalysisOutcome, InputKind, Phase, ResultsPanel,
};

/// Request body for POST /api/analyze (mirrors the server type).
#[derive(Serialize)]
struct AnalyzeRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    image_base64: Option<String>,
}

#[derive(Deserialize)]
struct AnalyzeResponse {
    result: String,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: String,
}

/// Run one analysis round trip against the server.
///
/// `Err` carries the message to show inline next to the inputs (validation
/// rejections and transport failures); `Ok` is whatever the dispatcher
/// produced, including its normalized remote-failure text.
async fn post_analyze(request: &AnalyzeRequest) -> Result<String, String> {
    let response = gloo_net::http::Request::post("/api/analyze")
        .json(request)
        .map_err(|e| format!("Failed to encode request: {e}"))?
        .send()
        .await
        .map_err(|e| format!("Request failed: {e}"))?;

    if response.status() == 422 {
        let rejection: ErrorResponse = response
            .json()
            .await
            .map_err(|e| format!("Failed to read response: {e}"))?;
        return Err(rejection.error);
    }

    if !response.ok() {
        return Err(format!("Server error: {}", response.status()));
    }

    let body: AnalyzeResponse = response
        .json()
        .await
        .map_err(|e| format!("Failed to read response: {e}"))?;
    Ok(body.result)
}

#[function_component(App)]
pub fn app() -> Html {
    let phase = use_state(Phase::default);
    let input_error = use_state(|| Option::<String>::None);

    let on_submit = {
        let phase = phase.clone();
        let input_error = input_error.clone();
        Callback::from(move |submission: Submission| {
            input_error.set(None);

            // Uploaded image takes priority; text is ignored for this
            // submission when both are present
            if let Some(image) = submission.image {
                phase.set(Phase::Awaiting(InputKind::Image));

                let phase = phase.clone();
                let input_error = input_error.clone();
                spawn_local(async move {
                    let request = AnalyzeRequest {
                        text: None,
                        image_base64: Some(general_purpose::STANDARD.encode(&image.bytes)),
                    };
                    match post_analyze(&request).await {
                        Ok(result) => phase.set(Phase::Shown(AnalysisOutcome {
                            result,
                            input: InputKind::Image,
                            image_data_url: Some(image_data_url(&image.bytes)),
                        })),
                        Err(message) => {
                            input_error.set(Some(message));
                            phase.set(Phase::Idle);
                        }
                    }
                });
            } else if !submission.text.trim().is_empty() {
                phase.set(Phase::Awaiting(InputKind::Text));

                let phase = phase.clone();
                let input_error = input_error.clone();
                spawn_local(async move {
                    let request = AnalyzeRequest {
                        text: Some(submission.text),
                        image_base64: None,
                    };
                    match post_analyze(&request).await {
                        Ok(result) => phase.set(Phase::Shown(AnalysisOutcome {
                            result,
                            input: InputKind::Text,
                            image_data_url: None,
                        })),
                        Err(message) => {
                            input_error.set(Some(message));
                            phase.set(Phase::Idle);
                        }
                    }
                });
            } else {
                input_error.set(Some(
                    "Please enter text or upload an image for analysis.".to_string(),
                ));
            }
        })
    };

    let busy = matches!(*phase, Phase::Awaiting(_));

    html! {
        <div class="app">
            <header class="app-header">
                <h1>{ "SDG 9 aiD" }</h1>
                <p>{ "A tool to analyze industrial practices and their alignment with \
                      Sustainable Development Goal 9" }</p>
            </header>
            <main class="app-main">
                <p class="intro">
                    { "This AI tool helps analyze text or images to detect potential violations \
                       of Sustainable Development Goal 9 (Industry, Innovation, and \
                       Infrastructure). It aims to identify issues like unsustainable \
                       industrialization, unsafe labor practices, and outdated infrastructure." }
                </p>
                <p class="disclaimer">
                    { "Disclaimer: This is a prototype tool. Results are indicative, \
                       not conclusive proof." }
                </p>
                <AnalyzeForm
                    on_submit={on_submit}
                    error={(*input_error).clone()}
                    busy={busy}
                />
                <ResultsPanel phase={(*phase).clone()} />
            </main>
        </div>
    }
}
