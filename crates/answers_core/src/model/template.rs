//! Questionnaire template shape.
//!
//! Only the section order and per-section question count matter to the
//! answers core. Question bodies are kept as opaque JSON values.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One template section. Question content is not interpreted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TemplateSection {
    pub questions: Vec<Value>,
}

impl TemplateSection {
    /// Creates a section with `count` placeholder questions.
    pub fn with_question_count(count: usize) -> Self {
        Self {
            questions: vec![Value::Object(Default::default()); count],
        }
    }
}

/// Structural description of a questionnaire.
///
/// Decoding requires both `id` and `sections`, and every section must carry a
/// `questions` array; a template missing either is rejected at decode time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuestionnaireTemplate {
    pub id: String,
    pub sections: Vec<TemplateSection>,
}

impl QuestionnaireTemplate {
    /// Builds a template from per-section question counts.
    pub fn from_shape(id: impl Into<String>, shape: &[usize]) -> Self {
        Self {
            id: id.into(),
            sections: shape
                .iter()
                .map(|count| TemplateSection::with_question_count(*count))
                .collect(),
        }
    }

    /// Returns per-section question counts in order.
    pub fn shape(&self) -> Vec<usize> {
        self.sections
            .iter()
            .map(|section| section.questions.len())
            .collect()
    }
}
