//! Choosing what to materialize
//!
//! Root stage: which catalog entry. Family stage: that family's feature
//! questions. Save stage: whether the fresh options become the stored default.

use super::sequencer::{run_stage, Asker, Choice, Question};
use crate::config::PreferenceStore;
use crate::log;
use crate::product::ProductConfig;
use crate::templates::catalog::{Catalog, TemplateKind};
use crate::templates::materializer::TemplateSource;
use crate::templates::options::{save_default_stage, wants_save};
use anyhow::Result;
use std::path::Path;

const TEMPLATE_KEY: &str = "template";

/// Resolve the template source, asking questions where needed
///
/// A `boilerplate` name skips every stage. Stored defaults for the chosen
/// family are read before its questions and updated after them.
pub fn select_source<C, S, A>(
    config: &C,
    boilerplate: Option<&str>,
    templates_root: &Path,
    store: &mut S,
    asker: &mut A,
) -> Result<TemplateSource>
where
    C: ProductConfig,
    S: PreferenceStore + ?Sized,
    A: Asker + ?Sized,
{
    if let Some(name) = boilerplate {
        let repo = config.boilerplate_repo(name);
        log::info(format!("Using boilerplate {}", repo));
        return Ok(TemplateSource::Remote(repo));
    }

    let catalog = Catalog::load(templates_root)?;
    let entry = match catalog.templates.as_slice() {
        [] => anyhow::bail!("No templates found in {}", templates_root.display()),
        [only] => {
            log::info(format!("Using template: {} - {}", only.name, only.description));
            only
        }
        entries => {
            let choices = entries
                .iter()
                .map(|e| Choice::new(&e.name, &e.name).hint(&e.description))
                .collect();
            let root_stage = vec![Question::select(
                TEMPLATE_KEY,
                "Select a template",
                choices,
                &entries[0].name,
            )];
            let answers = run_stage(&root_stage, asker)?;
            let name = answers.text(TEMPLATE_KEY).unwrap_or(&entries[0].name);
            catalog.find(name)?
        }
    };

    match &entry.kind {
        TemplateKind::Boilerplate { repo } => Ok(TemplateSource::Remote(repo.clone())),
        TemplateKind::Family { family } => {
            let stored = store.get(*family);
            let answers = run_stage(&family.questions(stored.as_ref()), asker)?;
            let options = family.options_from(&answers);

            let save = run_stage(&save_default_stage(stored.as_ref(), &options), asker)?;
            if wants_save(&save) {
                match store.set(*family, &options) {
                    Ok(()) => log::debug(format!("Saved defaults for {}", family)),
                    Err(e) => log::warning(format!("Could not save defaults: {:#}", e)),
                }
            }

            Ok(TemplateSource::Local {
                dir: templates_root.join(family.tag()),
                family: *family,
                options,
            })
        }
    }
}
