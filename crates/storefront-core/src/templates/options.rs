//! Template families and their option sets
//!
//! Families form a closed set. Each one owns its question flow, the local
//! directory its skeleton lives in, and the mapping from answers to options.

use crate::log;
use crate::tui::sequencer::{AnswerValue, Answers, Choice, Question};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

const SHOP_KEY: &str = "shop";
const TENANT_KEY: &str = "tenantId";
const FEATURES_KEY: &str = "features";
pub const SAVE_DEFAULT_KEY: &str = "saveDefault";

const SHOP_DEMO: &str = "demo";
const SHOP_OWN: &str = "own";
const FEATURE_TYPESCRIPT: &str = "typescript";
const FEATURE_PLATFORM: &str = "vercel";

/// A named class of scaffolds sharing a question flow and materializer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TemplateFamily {
    #[serde(rename = "nextjs-react")]
    NextjsReact,
}

impl TemplateFamily {
    pub const ALL: &'static [TemplateFamily] = &[TemplateFamily::NextjsReact];

    /// Tag used in the catalog, the preference file and on disk
    pub fn tag(&self) -> &'static str {
        match self {
            TemplateFamily::NextjsReact => "nextjs-react",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            TemplateFamily::NextjsReact => "Next.js + React",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|f| f.tag() == tag)
    }

    /// Feature questions for this family, defaulted from the stored options
    pub fn questions(&self, stored: Option<&TemplateOptions>) -> Vec<Question> {
        match self {
            TemplateFamily::NextjsReact => nextjs_questions(stored),
        }
    }

    /// Resolve the answers of [`questions`](Self::questions) into an option set
    pub fn options_from(&self, answers: &Answers) -> TemplateOptions {
        match self {
            TemplateFamily::NextjsReact => {
                let tenant_id = match answers.text(SHOP_KEY) {
                    Some(SHOP_OWN) => {
                        let tenant = answers
                            .text(TENANT_KEY)
                            .map(str::trim)
                            .filter(|t| !t.is_empty())
                            .map(str::to_string);
                        if tenant.is_none() {
                            log::warning("No tenant ID given; using the demo shop");
                        }
                        tenant
                    }
                    _ => None,
                };
                TemplateOptions {
                    tenant_id,
                    use_typescript: answers.has_tag(FEATURES_KEY, FEATURE_TYPESCRIPT),
                    use_platform: answers.has_tag(FEATURES_KEY, FEATURE_PLATFORM),
                }
            }
        }
    }
}

impl fmt::Display for TemplateFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// Resolved choices that govern how a family's project is configured
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TemplateOptions {
    /// Shop tenant; `None` means the demo shop
    pub tenant_id: Option<String>,

    /// Use the TypeScript variant instead of JavaScript
    pub use_typescript: bool,

    /// Deploy to the serverless platform instead of the bundled server
    pub use_platform: bool,
}

// Compared field by field so that adding an option forces a decision here.
impl PartialEq for TemplateOptions {
    fn eq(&self, other: &Self) -> bool {
        self.tenant_id == other.tenant_id
            && self.use_typescript == other.use_typescript
            && self.use_platform == other.use_platform
    }
}

impl Eq for TemplateOptions {}

impl TemplateOptions {
    /// Name of the language variant directory
    pub fn variant(&self) -> &'static str {
        if self.use_typescript {
            "typescript"
        } else {
            "javascript"
        }
    }

    /// Tenant written into the project environment
    pub fn tenant(&self) -> &str {
        self.tenant_id.as_deref().unwrap_or(SHOP_DEMO)
    }
}

fn nextjs_questions(stored: Option<&TemplateOptions>) -> Vec<Question> {
    let stored = stored.cloned().unwrap_or_default();

    let shop_default = if stored.tenant_id.is_some() {
        SHOP_OWN
    } else {
        SHOP_DEMO
    };

    let mut features = BTreeSet::new();
    if stored.use_typescript {
        features.insert(FEATURE_TYPESCRIPT.to_string());
    }
    if stored.use_platform {
        features.insert(FEATURE_PLATFORM.to_string());
    }

    vec![
        Question::select(
            SHOP_KEY,
            "Which shop should the storefront connect to?",
            vec![
                Choice::new(SHOP_DEMO, "Demo shop").hint("pre-filled catalog, no account needed"),
                Choice::new(SHOP_OWN, "My own shop"),
            ],
            shop_default,
        ),
        Question::input(
            TENANT_KEY,
            "Tenant ID",
            stored.tenant_id.as_deref().unwrap_or_default(),
        )
        .when(|answers| answers.text(SHOP_KEY) == Some(SHOP_OWN)),
        Question::multi_select(
            FEATURES_KEY,
            "Select features",
            vec![
                Choice::new(FEATURE_TYPESCRIPT, "TypeScript"),
                Choice::new(FEATURE_PLATFORM, "Deploy to Vercel")
                    .hint("serverless, no Express server"),
            ],
            features,
        ),
    ]
}

/// The "save as default" stage
///
/// The question is only visible when the fresh options differ from what is
/// stored, and then defaults to saving.
pub fn save_default_stage(
    stored: Option<&TemplateOptions>,
    chosen: &TemplateOptions,
) -> Vec<Question> {
    let differs = stored != Some(chosen);
    vec![
        Question::confirm(SAVE_DEFAULT_KEY, "Save these choices as the default?", true)
            .when(move |_| differs),
    ]
}

/// Whether the answers of [`save_default_stage`] ask for a save
pub fn wants_save(answers: &Answers) -> bool {
    matches!(answers.get(SAVE_DEFAULT_KEY), Some(AnswerValue::Bool(true)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::sequencer::{run_stage, DefaultAsker};

    #[test]
    fn test_family_tag_round_trip() {
        for family in TemplateFamily::ALL {
            assert_eq!(TemplateFamily::from_tag(family.tag()), Some(*family));
        }
        assert_eq!(TemplateFamily::from_tag("vue"), None);
    }

    #[test]
    fn test_options_from_demo_answers() {
        let mut answers = Answers::new();
        answers.insert(SHOP_KEY, AnswerValue::Text(SHOP_DEMO.into()));
        answers.insert(FEATURES_KEY, AnswerValue::tags([FEATURE_PLATFORM]));

        let options = TemplateFamily::NextjsReact.options_from(&answers);
        assert_eq!(options.tenant_id, None);
        assert!(options.use_platform);
        assert!(!options.use_typescript);
        assert_eq!(options.tenant(), "demo");
    }

    #[test]
    fn test_own_shop_without_tenant_falls_back_to_demo() {
        let mut answers = Answers::new();
        answers.insert(SHOP_KEY, AnswerValue::Text(SHOP_OWN.into()));
        answers.insert(TENANT_KEY, AnswerValue::Text("   ".into()));

        let options = TemplateFamily::NextjsReact.options_from(&answers);
        assert_eq!(options.tenant_id, None);
        assert_eq!(options.tenant(), "demo");
        assert_eq!(options, TemplateOptions::default());
    }

    #[test]
    fn test_tenant_ignored_for_demo_shop() {
        let mut answers = Answers::new();
        answers.insert(SHOP_KEY, AnswerValue::Text(SHOP_DEMO.into()));
        answers.insert(TENANT_KEY, AnswerValue::Text("acme".into()));

        let options = TemplateFamily::NextjsReact.options_from(&answers);
        assert_eq!(options.tenant_id, None);
    }

    #[test]
    fn test_stored_options_become_defaults() {
        let stored = TemplateOptions {
            tenant_id: Some("acme".into()),
            use_typescript: true,
            use_platform: false,
        };
        let questions = TemplateFamily::NextjsReact.questions(Some(&stored));
        let answers = run_stage(&questions, &mut DefaultAsker).unwrap();

        assert_eq!(TemplateFamily::NextjsReact.options_from(&answers), stored);
    }

    #[test]
    fn test_save_prompt_skipped_when_unchanged() {
        let stored = TemplateOptions::default();
        let stage = save_default_stage(Some(&stored), &TemplateOptions::default());
        let answers = run_stage(&stage, &mut DefaultAsker).unwrap();

        assert!(answers.is_empty());
        assert!(!wants_save(&answers));
    }

    #[test]
    fn test_save_prompt_defaults_to_yes_when_changed() {
        let chosen = TemplateOptions {
            use_platform: true,
            ..Default::default()
        };
        let stage = save_default_stage(None, &chosen);
        let answers = run_stage(&stage, &mut DefaultAsker).unwrap();

        assert!(wants_save(&answers));
    }

    #[test]
    fn test_options_serialize_camel_case() {
        let options = TemplateOptions {
            tenant_id: Some("acme".into()),
            use_typescript: false,
            use_platform: true,
        };
        let json = serde_json::to_string(&options).unwrap();
        assert!(json.contains("\"tenantId\":\"acme\""));
        assert!(json.contains("\"usePlatform\":true"));
    }
}
