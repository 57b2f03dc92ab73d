//! Per-model capability table.
//!
//! Model-dependent behavior is driven by this table rather than name
//! checks scattered through the client: adding a model is a table edit.

/// Capabilities of an upstream model.
#[derive(Debug, Clone, Copy)]
pub struct ModelCapabilities {
    /// Model id as sent to the upstream API.
    pub id: &'static str,

    /// Delimiter tag whose content is reasoning, e.g. `think` for models
    /// that wrap internal reasoning in `<think>...</think>`. `None` means
    /// the model emits visible output only.
    pub reasoning_tag: Option<&'static str>,
}

/// Known upstream models.
const MODEL_CAPABILITIES: &[ModelCapabilities] = &[
    ModelCapabilities {
        id: "openai",
        reasoning_tag: None,
    },
    ModelCapabilities {
        id: "openai-large",
        reasoning_tag: None,
    },
    ModelCapabilities {
        id: "openai-reasoning",
        reasoning_tag: Some("think"),
    },
    ModelCapabilities {
        id: "deepseek-reasoning",
        reasoning_tag: Some("think"),
    },
];

/// Look up capabilities for a model id.
///
/// Unknown models get the conservative default: no reasoning extraction.
pub fn capabilities_for(model: &str) -> ModelCapabilities {
    MODEL_CAPABILITIES
        .iter()
        .find(|caps| caps.id == model)
        .copied()
        .unwrap_or(ModelCapabilities {
            id: "",
            reasoning_tag: None,
        })
}
