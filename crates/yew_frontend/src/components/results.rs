//! Results panel component
//!
//! Renders the three phases of a submission: the idle hint, the transient
//! status while the request is in flight, and the final result with its
//! download link and (for image input) the uploaded image behind an
//! expander. The download link carries exactly the displayed string.

use base64::{engine::general_purpose, Engine as _};
use yew::prelude::*;

/// Which input kind a submission analyzed.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum InputKind {
    Text,
    Image,
}

/// A finished analysis as shown to the user.
#[derive(Clone, Debug, PartialEq)]
pub struct AnalysisOutcome {
    /// Model judgment or normalized failure text, rendered verbatim
    pub result: String,
    pub input: InputKind,
    /// Data URL of the analyzed image, for re-display
    pub image_data_url: Option<String>,
}

/// Presentation state of one submission round trip.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Awaiting(InputKind),
    Shown(AnalysisOutcome),
}

#[derive(Properties, PartialEq)]
pub struct ResultsPanelProps {
    pub phase: Phase,
}

/// Build the `data:` URL used by the download link.
///
/// Base64 keeps the file content byte-identical to the displayed result.
pub fn download_href(result: &str) -> String {
    format!(
        "data:text/plain;charset=utf-8;base64,{}",
        general_purpose::STANDARD.encode(result.as_bytes())
    )
}

/// Build a displayable data URL from uploaded image bytes.
pub fn image_data_url(bytes: &[u8]) -> String {
    format!(
        "data:{};base64,{}",
        sniff_mime(bytes),
        general_purpose::STANDARD.encode(bytes)
    )
}

/// PNG or JPEG, by signature. Uploads are restricted to those two formats.
fn sniff_mime(bytes: &[u8]) -> &'static str {
    if bytes.starts_with(&[0x89, b'P', b'N', b'G']) {
        "image/png"
    } else {
        "image/jpeg"
    }
}

#[function_component(ResultsPanel)]
pub fn results_panel(props: &ResultsPanelProps) -> Html {
    html! {
        <div class="results-panel">
            <h2>{ "Analysis Results:" }</h2>
            {
                match &props.phase {
                    Phase::Idle => html! {
                        <p class="hint">
                            { "Enter text or upload an image and click 'Analyze Input'." }
                        </p>
                    },
                    Phase::Awaiting(InputKind::Text) => html! {
                        <p class="status">{ "Analyzing text description... Please wait." }</p>
                    },
                    Phase::Awaiting(InputKind::Image) => html! {
                        <p class="status">{ "Analyzing uploaded image... Please wait." }</p>
                    },
                    Phase::Shown(outcome) => html! {
                        <div class="result">
                            <pre class="result-text">{ &outcome.result }</pre>
                            <a
                                href={download_href(&outcome.result)}
                                download="analysis_result.txt"
                            >
                                { "Download Analysis Result" }
                            </a>
                            if let Some(url) = &outcome.image_data_url {
                                <details>
                                    <summary>{ "See Uploaded Image" }</summary>
                                    <img src={url.clone()} alt="Analyzed Image" />
                                    <p class="caption">{ "Analyzed Image" }</p>
                                </details>
                            }
                        </div>
                    },
                }
            }
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_download_content_matches_displayed_result() {
        let result = "YES. The scene shows improper waste disposal.\nAnalysis Report: ...";
        let href = download_href(result);

        let encoded = href
            .strip_prefix("data:text/plain;charset=utf-8;base64,")
            .expect("download href should be a text/plain data URL");
        let decoded = general_purpose::STANDARD.decode(encoded).unwrap();

        assert_eq!(decoded, result.as_bytes());
    }

    #[test]
    fn test_image_data_url_sniffs_png() {
        let bytes = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];
        assert!(image_data_url(&bytes).starts_with("data:image/png;base64,"));
    }

    #[test]
    fn test_image_data_url_defaults_to_jpeg() {
        let bytes = [0xff, 0xd8, 0xff, 0xe0];
        assert!(image_data_url(&bytes).starts_with("data:image/jpeg;base64,"));
    }

    #[test]
    fn test_phase_default_is_idle() {
        assert_eq!(Phase::default(), Phase::Idle);
    }
}
