//! Terraform document generation from Grafana alert rules.
//!
//! Walks folders → rule groups → rules → data queries and produces one
//! document per folder that has at least one emitted rule group, plus a
//! shared `folders` document declaring a `grafana_folder` lookup for each of
//! those folders.
//!
//! Output is reproducible for identical input:
//! - folders are visited in ascending name order
//! - rule groups are emitted in descending name order
//! - rules are emitted in descending title order
//! - data queries keep their source order
//!
//! The fetched response is only borrowed; filtering and sorting work on
//! vectors of references.
//!
//! All documents land in one Terraform module, so document keys, folder
//! lookup labels and rule group labels must each be unique across the run.
//! When two names normalize to the same text, the one met later gets the
//! first free `_2`, `_3`, ... suffix.

use std::collections::{BTreeMap, HashSet};

use tracing::debug;

use crate::config::GeneratorConfig;
use crate::convert::object_to_config_value;
use crate::duration::parse_interval;
use crate::error::{ConversionError, GenerateError};
use crate::hcl::{Block, Body, Expression, FuncCall, Traversal, Value, sanitize_identifier};
use crate::model::{DataQuery, Folders, Rule, RuleGroup};

/// Key of the shared document holding the folder lookups.
pub const FOLDERS_DOCUMENT: &str = "folders";

const NO_LABELS: [&str; 0] = [];

/// Generated documents, keyed by the file stem they will be written under.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Documents {
    /// Shared `grafana_folder` lookups.
    pub folders: Body,
    /// One document per folder, keyed by its file stem.
    ///
    /// The key is the folder name with path separators replaced by `_`,
    /// suffixed when it clashes with the shared document or another folder.
    pub by_folder: BTreeMap<String, Body>,
}

impl Documents {
    /// Whether no folder produced a document.
    pub fn is_empty(&self) -> bool {
        self.by_folder.is_empty()
    }

    /// Number of documents [`Documents::iter`] yields.
    pub fn len(&self) -> usize {
        self.by_folder.len() + usize::from(!self.folders.is_empty())
    }

    pub fn get(&self, key: &str) -> Option<&Body> {
        if key == FOLDERS_DOCUMENT && !self.folders.is_empty() {
            return Some(&self.folders);
        }
        self.by_folder.get(key)
    }

    /// Documents in write order: the shared folders document first (when it
    /// has content), then folder documents by name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Body)> {
        let shared = (!self.folders.is_empty()).then_some((FOLDERS_DOCUMENT, &self.folders));
        shared.into_iter().chain(
            self.by_folder
                .iter()
                .map(|(key, body)| (key.as_str(), body)),
        )
    }
}

/// Builds Terraform documents for the `grafana_rule_group` resource.
#[derive(Debug, Clone, Default)]
pub struct Generator {
    config: GeneratorConfig,
}

impl Generator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// Generate every document for `folders`.
    ///
    /// # Errors
    ///
    /// Returns the first [`GenerateError`] met. Nothing generated before the
    /// failure is returned.
    pub fn generate(&self, folders: &Folders) -> Result<Documents, GenerateError> {
        let mut documents = Documents::default();
        let mut names = Names::new();

        for (folder, groups) in folders {
            let folder_label = names.folders.next_free(&sanitize_identifier(folder));
            let Some(body) =
                self.generate_folder(folder, &folder_label, groups, &mut names.groups)?
            else {
                debug!(folder = %folder, "No eligible rule groups, skipping folder");
                continue;
            };
            names.folders.insert(&folder_label);

            let key = names.documents.claim(&file_stem(folder));
            if key != *folder {
                debug!(folder = %folder, key = %key, "Folder document stored under another key");
            }

            documents
                .folders
                .append_new_block("data", ["grafana_folder".to_string(), folder_label])
                .body
                .set_attribute("title", folder.as_str());
            documents.by_folder.insert(key, body);
        }

        Ok(documents)
    }

    fn generate_folder(
        &self,
        folder: &str,
        folder_label: &str,
        groups: &[RuleGroup],
        group_labels: &mut Namespace,
    ) -> Result<Option<Body>, GenerateError> {
        let mut sorted: Vec<&RuleGroup> = groups.iter().collect();
        sorted.sort_by(|a, b| b.name.cmp(&a.name));

        let mut body = Body::new();
        for group in sorted {
            if let Some(block) =
                self.generate_rule_group(folder, folder_label, group, group_labels)?
            {
                body.append_block(block);
            }
        }

        Ok((!body.is_empty()).then_some(body))
    }

    fn generate_rule_group(
        &self,
        folder: &str,
        folder_label: &str,
        group: &RuleGroup,
        group_labels: &mut Namespace,
    ) -> Result<Option<Block>, GenerateError> {
        let mut rules: Vec<&Rule> = group
            .rules
            .iter()
            .filter(|rule| self.is_eligible(folder, group, rule))
            .collect();
        if rules.is_empty() {
            debug!(folder = %folder, group = %group.name, "No eligible rules, skipping rule group");
            return Ok(None);
        }

        let interval =
            parse_interval(&group.interval).map_err(|source| GenerateError::InvalidInterval {
                folder: folder.to_string(),
                group: group.name.clone(),
                source,
            })?;

        let label = group_labels.claim(&sanitize_identifier(&group.name));
        let mut block = Block::new("resource", ["grafana_rule_group".to_string(), label]);
        let body = &mut block.body;
        body.set_attribute("org_id", self.config.org_id);
        body.set_attribute(
            "folder_uid",
            Traversal::new("data", ["grafana_folder", folder_label, "uid"]),
        );
        body.set_attribute(
            "name",
            format!("{}{}", group.name, self.config.group_name_suffix),
        );
        body.set_attribute("interval_seconds", interval.as_secs());

        rules.sort_by(|a, b| b.grafana_alert.title.cmp(&a.grafana_alert.title));
        for rule in rules {
            body.append_block(self.generate_rule(group, rule)?);
        }

        Ok(Some(block))
    }

    fn is_eligible(&self, folder: &str, group: &RuleGroup, rule: &Rule) -> bool {
        if self.config.include_api_rules || !rule.is_api_provisioned() {
            return true;
        }
        debug!(
            folder = %folder,
            group = %group.name,
            rule = %rule.grafana_alert.title,
            "Skipping rule created through the API"
        );
        false
    }

    fn generate_rule(&self, group: &RuleGroup, rule: &Rule) -> Result<Block, GenerateError> {
        let alert = &rule.grafana_alert;
        let mut block = Block::new("rule", NO_LABELS);
        let body = &mut block.body;

        body.set_attribute(
            "name",
            format!("{}{}", alert.title, self.config.rule_title_suffix),
        );
        body.set_attribute("condition", alert.condition.as_str());
        body.set_attribute("for", rule.for_duration.as_str());
        body.set_attribute("no_data_state", alert.no_data_state.as_str());
        body.set_attribute("exec_err_state", alert.exec_err_state.as_str());

        if !rule.annotations.is_empty() {
            body.set_attribute("annotations", Value::string_map(&rule.annotations));
        }
        if !rule.labels.is_empty() {
            body.set_attribute("labels", Value::string_map(&rule.labels));
        }

        for query in &alert.data {
            let data = data_block(query).map_err(|source| GenerateError::Conversion {
                group: group.name.clone(),
                rule: alert.title.clone(),
                source,
            })?;
            body.append_block(data);
        }

        Ok(block)
    }
}

fn data_block(query: &DataQuery) -> Result<Block, ConversionError> {
    let mut block = Block::new("data", NO_LABELS);
    let body = &mut block.body;

    body.set_attribute("ref_id", query.ref_id.as_str());
    body.set_attribute("query_type", query.query_type.as_str());
    body.set_attribute("datasource_uid", query.datasource_uid.as_str());

    let range = &mut body.append_new_block("relative_time_range", NO_LABELS).body;
    range.set_attribute("from", query.relative_time_range.from);
    range.set_attribute("to", query.relative_time_range.to);

    let model = object_to_config_value(&query.model, "model")?;
    body.set_attribute(
        "model",
        FuncCall::new("jsonencode", vec![Expression::from(model)]),
    );

    Ok(block)
}

/// File stem for a folder document. Path separators would escape the output directory.
fn file_stem(folder: &str) -> String {
    folder
        .chars()
        .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
        .collect()
}

/// Names handed out so far within one namespace.
#[derive(Debug, Default)]
struct Namespace {
    taken: HashSet<String>,
}

impl Namespace {
    /// `base` if unused, otherwise the first unused `base_N` with `N >= 2`.
    fn next_free(&self, base: &str) -> String {
        if !self.taken.contains(base) {
            return base.to_string();
        }
        let mut n = 2;
        loop {
            let candidate = format!("{base}_{n}");
            if !self.taken.contains(&candidate) {
                return candidate;
            }
            n += 1;
        }
    }

    fn insert(&mut self, name: &str) {
        self.taken.insert(name.to_string());
    }

    fn claim(&mut self, base: &str) -> String {
        let name = self.next_free(base);
        self.insert(&name);
        name
    }
}

/// Namespaces that must stay collision-free within one run.
#[derive(Debug)]
struct Names {
    documents: Namespace,
    folders: Namespace,
    groups: Namespace,
}

impl Names {
    fn new() -> Self {
        let mut documents = Namespace::default();
        documents.insert(FOLDERS_DOCUMENT);
        Self {
            documents,
            folders: Namespace::default(),
            groups: Namespace::default(),
        }
    }
}
