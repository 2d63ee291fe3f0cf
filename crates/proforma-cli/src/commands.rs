use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use eyre::Result;
use proforma_core::store::{InstanceStore, JsonDirStore};
use proforma_core::{QuestionnaireInstance, TreePath};
use proforma_export::docx::generate_docx;
use proforma_export::markup::strip_markup;
use proforma_export::render::{render_template, ReportDocument, DEFAULT_TEMPLATE};
use proforma_report::{
    assemble_report, estimate_progress, prepare_export, visible_questions, Confirmation,
};

use crate::config::{self, CliConfig};

/// One CLI invocation: the config as loaded plus the instance store in use.
///
/// A one-off directory override replaces the store only, so saving the
/// config never persists it.
pub struct Session {
    config: CliConfig,
    store: JsonDirStore,
}

impl Session {
    pub fn new(config: CliConfig) -> Self {
        let store = JsonDirStore::new(config.instances_dir.clone());
        Self { config, store }
    }

    /// Read and write instances under `dir` for this invocation only.
    pub fn with_instances_dir(mut self, dir: PathBuf) -> Self {
        self.store = JsonDirStore::new(dir);
        self
    }

    pub fn config(&self) -> &CliConfig {
        &self.config
    }

    pub fn instances_dir(&self) -> &Path {
        self.store.root()
    }

    fn load(&self, id: &str) -> Result<QuestionnaireInstance> {
        Ok(self.store.load(id)?)
    }

    pub fn report_text(&self, id: &str, plain: bool) -> Result<String> {
        let instance = self.load(id)?;
        let text = assemble_report(&instance.tree(), &instance.selection()).text();
        Ok(if plain { strip_markup(&text) } else { text })
    }

    pub fn report(&self, id: &str, plain: bool) -> Result<()> {
        println!("{}", self.report_text(id, plain)?);
        Ok(())
    }

    pub fn progress(&self, id: &str) -> Result<()> {
        let instance = self.load(id)?;
        let progress = estimate_progress(&instance.tree(), &instance.selection());
        println!(
            "{}/{} questions answered ({}%)",
            progress.answered,
            progress.reachable,
            progress.percent()
        );
        Ok(())
    }

    pub fn outline(&self, id: &str) -> Result<()> {
        let instance = self.load(id)?;
        let tree = instance.tree();
        let state = instance.selection();

        for row in visible_questions(&tree, &state) {
            let mark = if state.is_answered(row.question) { 'x' } else { ' ' };
            let flag = if row.question.important { " !" } else { "" };
            println!(
                "{indent}[{mark}] {text}{flag}  ({path})",
                indent = "  ".repeat(row.depth),
                text = row.question.text,
                path = row.path,
            );
        }
        Ok(())
    }

    pub fn check(&self, id: &str) -> Result<()> {
        let instance = self.load(id)?;
        let issues = instance.selection().validate(&instance.tree());
        if issues.is_empty() {
            println!("no issues");
        }
        for issue in &issues {
            println!("{issue}");
        }
        Ok(())
    }

    pub fn export(&self, id: &str, out: &Path, assume_yes: bool) -> Result<()> {
        let instance = self.load(id)?;
        let pending = prepare_export(&instance.tree(), &instance.selection());

        let confirmation = match pending.prompt() {
            Some(prompt) if !assume_yes => ask(&prompt)?,
            _ => Confirmation::Proceed,
        };
        let Some(text) = pending.release(confirmation) else {
            eprintln!("export cancelled");
            return Ok(());
        };

        self.write_export(&text, &instance.title, out)?;
        tracing::info!(path = %out.display(), "report exported");
        Ok(())
    }

    /// Write report text to `out`: DOCX for `.docx`, markup-free text
    /// otherwise.
    pub fn write_export(&self, text: &str, title: &str, out: &Path) -> Result<()> {
        let is_docx = out
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("docx"));
        let bytes = if is_docx {
            generate_docx(text, Some(title), &self.config.styles)?
        } else {
            strip_markup(text).into_bytes()
        };
        std::fs::write(out, bytes)?;
        Ok(())
    }

    pub fn render_report(&self, id: &str, template: Option<&Path>) -> Result<String> {
        let instance = self.load(id)?;
        let tree = instance.tree();
        let state = instance.selection();
        let document = ReportDocument::new(
            instance.title.clone(),
            &assemble_report(&tree, &state),
            estimate_progress(&tree, &state),
        );

        let rendered = match template.or(self.config.report_template.as_deref()) {
            Some(path) => {
                let content = std::fs::read_to_string(path)
                    .map_err(|e| eyre::eyre!("failed to read template {}: {e}", path.display()))?;
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| "report.txt".to_string());
                render_template(&name, &content, &document)?
            }
            None => render_template("report.txt", DEFAULT_TEMPLATE, &document)?,
        };
        Ok(rendered)
    }

    pub fn render(&self, id: &str, template: Option<&Path>) -> Result<()> {
        print!("{}", self.render_report(id, template)?);
        Ok(())
    }

    pub fn set_conclusion(&self, id: &str, path: &str, include: bool) -> Result<()> {
        let mut instance = self.load(id)?;
        let path: TreePath = path.parse()?;

        let tree = instance.tree().set_include_in_conclusion(&path, include)?;
        instance.set_tree(&tree);
        self.store.save(id, &instance)?;

        println!("{path}: include in conclusion = {include}");
        Ok(())
    }

    pub fn show_config(&self, init: bool) -> Result<()> {
        if init {
            let path = config::save_config(&self.config)?;
            println!("wrote {}", path.display());
        } else {
            println!("{}", config::config_path()?.display());
        }
        println!("{}", serde_json::to_string_pretty(&self.config)?);
        if self.instances_dir() != self.config.instances_dir {
            println!("instances for this run: {}", self.instances_dir().display());
        }
        Ok(())
    }
}

fn ask(prompt: &str) -> Result<Confirmation> {
    eprint!("{prompt} [y/N] ");
    std::io::stderr().flush()?;

    let mut answer = String::new();
    std::io::stdin().lock().read_line(&mut answer)?;
    Ok(match answer.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" => Confirmation::Proceed,
        _ => Confirmation::Cancel,
    })
}
