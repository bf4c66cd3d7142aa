//! The active filter: one canonical filter/sort configuration with three
//! interchangeable persistence surfaces.
//!
//! The canonical struct keeps every list ordered; each codec decides for
//! itself whether order survives (the durable preference surface stores tag
//! lists as unordered sets, the other two preserve order exactly). Every
//! decode path falls back to an explicit default, so decoding never fails.

use std::collections::BTreeSet;

use plaintask_core::filter::{
    AndFilter, ByContextFilter, ByPriorityFilter, ByProjectFilter, ByTextFilter, TaskFilter,
};
use plaintask_core::{Priority, SortField, SortKey, Task};
use serde_json::Value;

/// Key/value bag backing all three persistence surfaces.
pub type ConfigBag = serde_json::Map<String, Value>;

/// Fallback display name when the preference store has none.
pub const DEFAULT_NAME: &str = "plaintask";

// Transient-state and preference keys.
const KEY_PRIOS: &str = "m_prios";
const KEY_CONTEXTS: &str = "m_contexts";
const KEY_PROJECTS: &str = "m_projects";
const KEY_SEARCH: &str = "m_search";
const KEY_CONTEXTS_NOT: &str = "m_contextsNot";
const KEY_PRIOS_NOT: &str = "m_priosNot";
const KEY_PROJECTS_NOT: &str = "m_projectsNot";
const KEY_SORTS: &str = "m_sorts";

// Transfer-payload keys.
const PAYLOAD_TITLE: &str = "TITLE";
const PAYLOAD_SORTS: &str = "SORTS";
const PAYLOAD_CONTEXTS: &str = "CONTEXTS";
const PAYLOAD_PROJECTS: &str = "PROJECTS";
const PAYLOAD_PRIORITIES: &str = "PRIORITIES";
const PAYLOAD_CONTEXTS_NOT: &str = "CONTEXTSnot";
const PAYLOAD_PROJECTS_NOT: &str = "PROJECTSnot";
const PAYLOAD_PRIORITIES_NOT: &str = "PRIORITIESnot";
const PAYLOAD_SEARCH: &str = "query";

// Title fragments, appended in fixed category order.
const TITLE_FILTER_APPLIED: &str = "Filter:";
const TITLE_PRIORITY: &str = "priority";
const TITLE_PROJECT: &str = "project";
const TITLE_CONTEXT: &str = "context";
const TITLE_SEARCH: &str = "search";
const TITLE_NO_FILTER: &str = "No filter";

/// Current filter and sort configuration for one view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActiveFilter {
    name: Option<String>,
    priorities: Vec<Priority>,
    contexts: Vec<String>,
    projects: Vec<String>,
    priorities_not: bool,
    contexts_not: bool,
    projects_not: bool,
    search: Option<String>,
    sorts: Vec<SortKey>,
}

impl ActiveFilter {
    /// Empty configuration: no criteria, no sort, no name.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Display name, if one was assigned or decoded.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Assign the display name.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    /// Allowed priorities, in configuration order.
    #[must_use]
    pub fn priorities(&self) -> &[Priority] {
        &self.priorities
    }

    /// Replace the allowed priorities.
    pub fn set_priorities(&mut self, priorities: Vec<Priority>) {
        self.priorities = priorities;
    }

    /// Whether the priority criterion is negated.
    #[must_use]
    pub const fn priorities_not(&self) -> bool {
        self.priorities_not
    }

    /// Set the priority negation flag.
    pub const fn set_priorities_not(&mut self, negate: bool) {
        self.priorities_not = negate;
    }

    /// Allowed contexts, in configuration order.
    #[must_use]
    pub fn contexts(&self) -> &[String] {
        &self.contexts
    }

    /// Replace the allowed contexts.
    pub fn set_contexts(&mut self, contexts: Vec<String>) {
        self.contexts = contexts;
    }

    /// Whether the context criterion is negated.
    #[must_use]
    pub const fn contexts_not(&self) -> bool {
        self.contexts_not
    }

    /// Set the context negation flag.
    pub const fn set_contexts_not(&mut self, negate: bool) {
        self.contexts_not = negate;
    }

    /// Allowed projects, in configuration order.
    #[must_use]
    pub fn projects(&self) -> &[String] {
        &self.projects
    }

    /// Replace the allowed projects.
    pub fn set_projects(&mut self, projects: Vec<String>) {
        self.projects = projects;
    }

    /// Whether the project criterion is negated.
    #[must_use]
    pub const fn projects_not(&self) -> bool {
        self.projects_not
    }

    /// Set the project negation flag.
    pub const fn set_projects_not(&mut self, negate: bool) {
        self.projects_not = negate;
    }

    /// Free-text search query, if any.
    #[must_use]
    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    /// Set the search query; blank input clears it.
    pub fn set_search(&mut self, search: Option<String>) {
        self.search = search.and_then(|raw| {
            let trimmed = raw.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_owned())
        });
    }

    /// Configured sort keys, in application order.
    #[must_use]
    pub fn sorts(&self) -> &[SortKey] {
        &self.sorts
    }

    /// Replace the sort key chain.
    pub fn set_sorts(&mut self, sorts: Vec<SortKey>) {
        self.sorts = sorts;
    }

    /// Whether any criterion is configured. Sort configuration alone does
    /// not count as a filter.
    #[must_use]
    pub fn has_filter(&self) -> bool {
        !self.priorities.is_empty()
            || !self.contexts.is_empty()
            || !self.projects.is_empty()
            || self
                .search
                .as_deref()
                .is_some_and(|search| !search.trim().is_empty())
    }

    /// Reset the four criteria and their negation flags. The sort chain and
    /// the display name survive.
    pub fn clear(&mut self) {
        self.priorities = Vec::new();
        self.contexts = Vec::new();
        self.projects = Vec::new();
        self.projects_not = false;
        self.search = None;
        self.priorities_not = false;
        self.contexts_not = false;
    }

    /// Apply the configured criteria to a task list.
    ///
    /// Completed tasks are discarded first unless `show_completed`; the
    /// remaining tasks pass through a conjunction built from only the
    /// non-empty criteria, so an unconfigured criterion never rejects
    /// anything. Input order is preserved.
    #[must_use]
    pub fn apply(&self, tasks: &[Task], show_completed: bool) -> Vec<Task> {
        let conjunction = self.conjunction();
        tasks
            .iter()
            .filter(|task| show_completed || !task.is_completed())
            .filter(|task| conjunction.apply(task))
            .cloned()
            .collect()
    }

    /// Resolve the sort keys to use: the configured chain, or one
    /// normal-direction key per default field when nothing is configured.
    ///
    /// Pure resolution: repeated calls never mutate the configuration.
    #[must_use]
    pub fn effective_sort(&self, defaults: &[SortField]) -> Vec<SortKey> {
        if self.sorts.is_empty() {
            defaults.iter().copied().map(SortKey::ascending).collect()
        } else {
            self.sorts.clone()
        }
    }

    /// Suggest a name: the single configured criterion element, when the
    /// union of contexts, priority codes, and projects has exactly one.
    #[must_use]
    pub fn proposed_name(&self) -> Option<String> {
        let mut applied: Vec<String> = self.contexts.clone();
        applied.extend(self.priorities.iter().map(|priority| priority.code()));
        applied.extend(self.projects.iter().cloned());
        match applied.as_slice() {
            [single] => Some(single.clone()),
            _ => None,
        }
    }

    /// Human-readable summary: a base label plus one fragment per non-empty
    /// criterion category, or a distinct label when nothing is configured.
    #[must_use]
    pub fn title(&self) -> String {
        if !self.has_filter() {
            return TITLE_NO_FILTER.to_owned();
        }
        let mut title = TITLE_FILTER_APPLIED.to_owned();
        for (active, fragment) in [
            (!self.priorities.is_empty(), TITLE_PRIORITY),
            (!self.projects.is_empty(), TITLE_PROJECT),
            (!self.contexts.is_empty(), TITLE_CONTEXT),
            (self.search.is_some(), TITLE_SEARCH),
        ] {
            if active {
                title.push(' ');
                title.push_str(fragment);
            }
        }
        title
    }

    /// Build the conjunction of the non-empty criteria. The completed-task
    /// gate lives in [`apply`](Self::apply), not here.
    #[must_use]
    pub fn conjunction(&self) -> AndFilter {
        let mut conjunction = AndFilter::new();
        if !self.priorities.is_empty() {
            conjunction.push(Box::new(ByPriorityFilter::new(
                self.priorities.clone(),
                self.priorities_not,
            )));
        }
        if !self.contexts.is_empty() {
            conjunction.push(Box::new(ByContextFilter::new(
                self.contexts.clone(),
                self.contexts_not,
            )));
        }
        if !self.projects.is_empty() {
            conjunction.push(Box::new(ByProjectFilter::new(
                self.projects.clone(),
                self.projects_not,
            )));
        }
        if let Some(query) = self.search.as_deref() {
            if let Some(filter) = ByTextFilter::new(query, false) {
                conjunction.push(Box::new(filter));
            }
        }
        conjunction
    }

    /// Copy the configuration into a transient state bundle: typed field
    /// copies, list order preserved.
    pub fn save_in_bundle(&self, bundle: &mut ConfigBag) {
        bundle.insert(KEY_PRIOS.to_owned(), string_list(self.priority_codes()));
        bundle.insert(
            KEY_CONTEXTS.to_owned(),
            string_list(self.contexts.iter().cloned()),
        );
        bundle.insert(
            KEY_PROJECTS.to_owned(),
            string_list(self.projects.iter().cloned()),
        );
        bundle.insert(KEY_CONTEXTS_NOT.to_owned(), Value::Bool(self.contexts_not));
        bundle.insert(KEY_SORTS.to_owned(), string_list(self.sort_codes()));
        bundle.insert(KEY_PRIOS_NOT.to_owned(), Value::Bool(self.priorities_not));
        bundle.insert(KEY_PROJECTS_NOT.to_owned(), Value::Bool(self.projects_not));
        bundle.insert(
            KEY_SEARCH.to_owned(),
            self.search.clone().map_or(Value::Null, Value::String),
        );
    }

    /// Restore the configuration from a transient state bundle; every
    /// missing field decodes to its default.
    pub fn init_from_bundle(&mut self, bundle: &ConfigBag) {
        self.priorities = decode_priorities(&get_string_list(bundle, KEY_PRIOS));
        self.contexts = get_string_list(bundle, KEY_CONTEXTS);
        self.projects = get_string_list(bundle, KEY_PROJECTS);
        self.search = get_string(bundle, KEY_SEARCH);
        self.contexts_not = get_bool(bundle, KEY_CONTEXTS_NOT);
        self.priorities_not = get_bool(bundle, KEY_PRIOS_NOT);
        self.projects_not = get_bool(bundle, KEY_PROJECTS_NOT);
        self.sorts = decode_sorts(&get_string_list(bundle, KEY_SORTS));
    }

    /// Persist into the durable preference map: tag and priority lists as
    /// unordered string sets, the sort chain newline-joined, the display
    /// name under `TITLE`.
    pub fn save_in_prefs(&self, prefs: &mut ConfigBag) {
        prefs.insert(
            PAYLOAD_TITLE.to_owned(),
            self.name.clone().map_or(Value::Null, Value::String),
        );
        prefs.insert(
            KEY_SORTS.to_owned(),
            Value::String(join_lines(self.sort_codes())),
        );
        prefs.insert(
            KEY_CONTEXTS.to_owned(),
            string_set(self.contexts.iter().cloned()),
        );
        prefs.insert(KEY_PRIOS.to_owned(), string_set(self.priority_codes()));
        prefs.insert(
            KEY_PROJECTS.to_owned(),
            string_set(self.projects.iter().cloned()),
        );
        prefs.insert(
            KEY_SEARCH.to_owned(),
            self.search.clone().map_or(Value::Null, Value::String),
        );
        prefs.insert(KEY_CONTEXTS_NOT.to_owned(), Value::Bool(self.contexts_not));
        prefs.insert(KEY_PRIOS_NOT.to_owned(), Value::Bool(self.priorities_not));
        prefs.insert(KEY_PROJECTS_NOT.to_owned(), Value::Bool(self.projects_not));
    }

    /// Restore from the durable preference map. Set-encoded lists come back
    /// in sorted order; missing fields decode to defaults, and a missing
    /// name falls back to [`DEFAULT_NAME`].
    pub fn init_from_prefs(&mut self, prefs: &ConfigBag) {
        self.sorts = decode_sorts(&split_joined(
            &get_string(prefs, KEY_SORTS).unwrap_or_default(),
        ));
        self.contexts = get_string_list(prefs, KEY_CONTEXTS);
        self.priorities = decode_priorities(&get_string_list(prefs, KEY_PRIOS));
        self.projects = get_string_list(prefs, KEY_PROJECTS);
        self.search = get_string(prefs, KEY_SEARCH);
        self.contexts_not = get_bool(prefs, KEY_CONTEXTS_NOT);
        self.priorities_not = get_bool(prefs, KEY_PRIOS_NOT);
        self.projects_not = get_bool(prefs, KEY_PROJECTS_NOT);
        self.name = Some(get_string(prefs, PAYLOAD_TITLE).unwrap_or_else(|| DEFAULT_NAME.to_owned()));
    }

    /// Encode into a one-shot transfer payload: every list newline-joined
    /// into a single string.
    pub fn save_in_payload(&self, payload: &mut ConfigBag) {
        payload.insert(
            PAYLOAD_TITLE.to_owned(),
            self.name.clone().map_or(Value::Null, Value::String),
        );
        payload.insert(
            PAYLOAD_CONTEXTS.to_owned(),
            Value::String(self.contexts.join("\n")),
        );
        payload.insert(PAYLOAD_CONTEXTS_NOT.to_owned(), Value::Bool(self.contexts_not));
        payload.insert(
            PAYLOAD_PROJECTS.to_owned(),
            Value::String(self.projects.join("\n")),
        );
        payload.insert(PAYLOAD_PROJECTS_NOT.to_owned(), Value::Bool(self.projects_not));
        payload.insert(
            PAYLOAD_PRIORITIES.to_owned(),
            Value::String(join_lines(self.priority_codes())),
        );
        payload.insert(
            PAYLOAD_PRIORITIES_NOT.to_owned(),
            Value::Bool(self.priorities_not),
        );
        payload.insert(
            PAYLOAD_SORTS.to_owned(),
            Value::String(join_lines(self.sort_codes())),
        );
        payload.insert(
            PAYLOAD_SEARCH.to_owned(),
            self.search.clone().map_or(Value::Null, Value::String),
        );
    }

    /// Decode from a transfer payload. Absent fields and empty strings both
    /// mean "empty list"; decoding never fails.
    pub fn init_from_payload(&mut self, payload: &ConfigBag) {
        self.priorities_not = get_bool(payload, PAYLOAD_PRIORITIES_NOT);
        self.projects_not = get_bool(payload, PAYLOAD_PROJECTS_NOT);
        self.contexts_not = get_bool(payload, PAYLOAD_CONTEXTS_NOT);
        self.search = get_string(payload, PAYLOAD_SEARCH);
        self.name = get_string(payload, PAYLOAD_TITLE);
        self.sorts = decode_sorts(&split_joined(
            &get_string(payload, PAYLOAD_SORTS).unwrap_or_default(),
        ));
        self.priorities = decode_priorities(&split_joined(
            &get_string(payload, PAYLOAD_PRIORITIES).unwrap_or_default(),
        ));
        self.projects = split_joined(&get_string(payload, PAYLOAD_PROJECTS).unwrap_or_default());
        self.contexts = split_joined(&get_string(payload, PAYLOAD_CONTEXTS).unwrap_or_default());
    }

    fn priority_codes(&self) -> impl Iterator<Item = String> {
        self.priorities.iter().map(|priority| priority.code())
    }

    fn sort_codes(&self) -> impl Iterator<Item = String> {
        self.sorts.iter().map(ToString::to_string)
    }
}

fn string_list(values: impl IntoIterator<Item = String>) -> Value {
    Value::Array(values.into_iter().map(Value::String).collect())
}

fn string_set(values: impl IntoIterator<Item = String>) -> Value {
    let set: BTreeSet<String> = values.into_iter().collect();
    Value::Array(set.into_iter().map(Value::String).collect())
}

fn join_lines(values: impl IntoIterator<Item = String>) -> String {
    values.into_iter().collect::<Vec<_>>().join("\n")
}

fn split_joined(joined: &str) -> Vec<String> {
    if joined.is_empty() {
        Vec::new()
    } else {
        joined.split('\n').map(str::to_owned).collect()
    }
}

fn get_bool(bag: &ConfigBag, key: &str) -> bool {
    bag.get(key).and_then(Value::as_bool).unwrap_or(false)
}

fn get_string(bag: &ConfigBag, key: &str) -> Option<String> {
    bag.get(key).and_then(Value::as_str).map(str::to_owned)
}

fn get_string_list(bag: &ConfigBag, key: &str) -> Vec<String> {
    bag.get(key)
        .and_then(Value::as_array)
        .map_or_else(Vec::new, |values| {
            values
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_owned)
                .collect()
        })
}

fn decode_priorities(codes: &[String]) -> Vec<Priority> {
    codes
        .iter()
        .filter_map(|code| Priority::from_code(code))
        .collect()
}

fn decode_sorts(codes: &[String]) -> Vec<SortKey> {
    codes.iter().filter_map(|code| code.parse().ok()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_filter() -> ActiveFilter {
        let mut filter = ActiveFilter::new();
        filter.set_name("errands");
        filter.set_priorities(decode_priorities(&["A".into(), "-".into()]));
        filter.set_contexts(vec!["store".into(), "home".into()]);
        filter.set_projects(vec!["groceries".into()]);
        filter.set_contexts_not(true);
        filter.set_search(Some("milk".into()));
        filter.set_sorts(decode_sorts(&["+!priority".into(), "-!project".into()]));
        filter
    }

    #[test]
    fn has_filter_ignores_sort_configuration() {
        let mut filter = ActiveFilter::new();
        assert!(!filter.has_filter());

        filter.set_sorts(decode_sorts(&["+!priority".into()]));
        assert!(!filter.has_filter());

        filter.set_search(Some("query".into()));
        assert!(filter.has_filter());

        filter.set_search(Some("   ".into()));
        assert!(!filter.has_filter());

        filter.set_projects(vec!["groceries".into()]);
        assert!(filter.has_filter());
    }

    #[test]
    fn apply_without_criteria_keeps_open_tasks() {
        let filter = ActiveFilter::new();
        let tasks = vec![
            Task::parse("open one"),
            Task::parse("x done"),
            Task::parse("open two"),
        ];

        let visible = filter.apply(&tasks, false);
        assert_eq!(visible.len(), 2);
        assert!(visible.iter().all(|task| !task.is_completed()));

        let all = filter.apply(&tasks, true);
        assert_eq!(all.len(), 3);
    }

    #[test]
    fn apply_selects_by_project() {
        let mut filter = ActiveFilter::new();
        filter.set_projects(vec!["groceries".into()]);

        let tagged = Task::parse("buy milk +groceries");
        let untagged = Task::parse("buy stamps");
        let visible = filter.apply(&[tagged.clone(), untagged], false);

        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].text(), tagged.text());
    }

    #[test]
    fn apply_conjoins_all_configured_criteria() {
        let mut filter = ActiveFilter::new();
        filter.set_projects(vec!["groceries".into()]);
        filter.set_search(Some("milk".into()));

        let tasks = vec![
            Task::parse("buy milk +groceries"),
            Task::parse("buy bread +groceries"),
            Task::parse("milk the cows +farm"),
        ];
        let visible = filter.apply(&tasks, false);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].text(), "buy milk +groceries");
    }

    #[test]
    fn apply_preserves_input_order() {
        let mut filter = ActiveFilter::new();
        filter.set_contexts(vec!["phone".into()]);

        let tasks = vec![
            Task::parse("call mom @phone"),
            Task::parse("email boss @computer"),
            Task::parse("call dentist @phone"),
        ];
        let visible = filter.apply(&tasks, false);
        let bodies: Vec<&str> = visible.iter().map(Task::text).collect();
        assert_eq!(bodies, ["call mom @phone", "call dentist @phone"]);
    }

    #[test]
    fn negated_criterion_excludes_matches() {
        let mut filter = ActiveFilter::new();
        filter.set_projects(vec!["work".into()]);
        filter.set_projects_not(true);

        let tasks = vec![
            Task::parse("prepare slides +work"),
            Task::parse("plant tomatoes +garden"),
            Task::parse("no tags at all"),
        ];
        let visible = filter.apply(&tasks, false);
        let bodies: Vec<&str> = visible.iter().map(Task::text).collect();
        assert_eq!(bodies, ["plant tomatoes +garden", "no tags at all"]);
    }

    #[test]
    fn effective_sort_falls_back_to_defaults() {
        let filter = ActiveFilter::new();
        let defaults = [SortField::Completed, SortField::Priority];

        let resolved = filter.effective_sort(&defaults);
        assert_eq!(
            resolved,
            vec![
                SortKey::ascending(SortField::Completed),
                SortKey::ascending(SortField::Priority),
            ]
        );

        // Pure: a second resolution returns the same thing and the
        // configuration still has no sorts of its own.
        assert_eq!(filter.effective_sort(&defaults), resolved);
        assert!(filter.sorts().is_empty());
    }

    #[test]
    fn effective_sort_prefers_configured_keys() {
        let mut filter = ActiveFilter::new();
        filter.set_sorts(decode_sorts(&["-!alphabetical".into()]));
        assert_eq!(
            filter.effective_sort(&[SortField::Completed]),
            vec![SortKey::descending(SortField::Alphabetical)]
        );
    }

    #[test]
    fn proposed_name_needs_exactly_one_element() {
        let mut filter = ActiveFilter::new();
        assert_eq!(filter.proposed_name(), None);

        filter.set_projects(vec!["groceries".into()]);
        assert_eq!(filter.proposed_name(), Some("groceries".into()));

        filter.set_contexts(vec!["store".into()]);
        assert_eq!(filter.proposed_name(), None);
    }

    #[test]
    fn proposed_name_uses_priority_codes() {
        let mut filter = ActiveFilter::new();
        filter.set_priorities(decode_priorities(&["B".into()]));
        assert_eq!(filter.proposed_name(), Some("B".into()));
    }

    #[test]
    fn title_lists_active_categories_in_fixed_order() {
        let mut filter = ActiveFilter::new();
        assert_eq!(filter.title(), "No filter");

        filter.set_contexts(vec!["store".into()]);
        filter.set_priorities(decode_priorities(&["A".into()]));
        assert_eq!(filter.title(), "Filter: priority context");

        filter.set_search(Some("milk".into()));
        assert_eq!(filter.title(), "Filter: priority context search");
    }

    #[test]
    fn clear_keeps_sorts_and_name() {
        let mut filter = sample_filter();
        filter.clear();

        assert!(!filter.has_filter());
        assert!(filter.priorities().is_empty());
        assert!(filter.contexts().is_empty());
        assert!(filter.projects().is_empty());
        assert!(!filter.contexts_not());
        assert_eq!(filter.search(), None);
        assert_eq!(filter.sorts().len(), 2);
        assert_eq!(filter.name(), Some("errands"));
    }

    #[test]
    fn bundle_round_trip_preserves_everything() {
        let original = sample_filter();
        let mut bundle = ConfigBag::new();
        original.save_in_bundle(&mut bundle);

        let mut restored = ActiveFilter::new();
        restored.init_from_bundle(&bundle);

        // The bundle carries no name; everything else must survive.
        let mut expected = original;
        expected.name = None;
        assert_eq!(restored, expected);
    }

    #[test]
    fn payload_round_trip_preserves_everything() {
        let original = sample_filter();
        let mut payload = ConfigBag::new();
        original.save_in_payload(&mut payload);

        let mut restored = ActiveFilter::new();
        restored.init_from_payload(&payload);
        assert_eq!(restored, original);
    }

    #[test]
    fn prefs_round_trip_is_logically_equivalent() {
        let original = sample_filter();
        let mut prefs = ConfigBag::new();
        original.save_in_prefs(&mut prefs);

        let mut restored = ActiveFilter::new();
        restored.init_from_prefs(&prefs);

        // The durable surface discards list order, so compare as sets.
        let as_set = |values: &[String]| values.iter().cloned().collect::<BTreeSet<_>>();
        assert_eq!(as_set(restored.contexts()), as_set(original.contexts()));
        assert_eq!(as_set(restored.projects()), as_set(original.projects()));
        assert_eq!(restored.priorities().len(), original.priorities().len());
        assert_eq!(restored.sorts(), original.sorts());
        assert_eq!(restored.search(), original.search());
        assert_eq!(restored.name(), original.name());
        assert_eq!(restored.contexts_not(), original.contexts_not());
        assert_eq!(restored.priorities_not(), original.priorities_not());
        assert_eq!(restored.projects_not(), original.projects_not());
    }

    #[test]
    fn surfaces_are_interchangeable() {
        let original = sample_filter();

        let mut payload = ConfigBag::new();
        original.save_in_payload(&mut payload);
        let mut via_payload = ActiveFilter::new();
        via_payload.init_from_payload(&payload);

        let mut bundle = ConfigBag::new();
        via_payload.save_in_bundle(&mut bundle);
        let mut via_bundle = ActiveFilter::new();
        via_bundle.init_from_bundle(&bundle);
        via_bundle.set_name("errands");

        assert_eq!(via_bundle, original);
    }

    #[test]
    fn empty_payload_decodes_to_defaults() {
        let mut filter = sample_filter();
        filter.init_from_payload(&ConfigBag::new());

        assert_eq!(filter, ActiveFilter::new());
        assert!(!filter.has_filter());
    }

    #[test]
    fn empty_string_payload_fields_mean_empty_lists() {
        let mut payload = ConfigBag::new();
        payload.insert(
            "PROJECTS".to_owned(),
            Value::String(String::new()),
        );
        payload.insert("SORTS".to_owned(), Value::String(String::new()));

        let mut filter = ActiveFilter::new();
        filter.init_from_payload(&payload);
        assert!(filter.projects().is_empty());
        assert!(filter.sorts().is_empty());
    }

    #[test]
    fn missing_prefs_name_falls_back() {
        let mut filter = ActiveFilter::new();
        filter.init_from_prefs(&ConfigBag::new());
        assert_eq!(filter.name(), Some(DEFAULT_NAME));
    }

    #[test]
    fn unparseable_sort_keys_are_dropped_on_decode() {
        let mut payload = ConfigBag::new();
        payload.insert(
            "SORTS".to_owned(),
            Value::String("+!priority\nnonsense\n-!project".to_owned()),
        );

        let mut filter = ActiveFilter::new();
        filter.init_from_payload(&payload);
        assert_eq!(
            filter.sorts(),
            [
                SortKey::ascending(SortField::Priority),
                SortKey::descending(SortField::Project),
            ]
        );
    }
}
