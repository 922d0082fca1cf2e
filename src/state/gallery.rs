/// Gallery state machine
///
/// Owns everything the window shows: the selected category, the records of
/// the last successful fetch, the loading/error flags and the record shown in
/// the detail popup. The iced application drives it with events and executes
/// the `FetchRequest`s it hands back.

use rand::seq::SliceRandom;

use super::data::{AnimalRecord, Category};

/// Identifies one fetch. Only the most recently issued id may commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestId(u64);

/// A fetch the caller must perform: `GET /data/{category}`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchRequest {
    pub id: RequestId,
    pub category: Category,
}

/// Input accepted by `select_category`
///
/// Category buttons emit UI events carrying a value, while startup and the
/// command line hand over bare tokens. Both are normalized to one token
/// before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryInput {
    Raw(String),
    Event { value: Option<String> },
}

impl CategoryInput {
    /// Resolve to a member of the fixed set, if any
    pub fn resolve(&self) -> Option<Category> {
        let token = match self {
            CategoryInput::Raw(token) => Some(token.as_str()),
            CategoryInput::Event { value } => value.as_deref(),
        };
        token.and_then(Category::from_token)
    }
}

/// Where a click inside the popup overlay landed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOrigin {
    /// The dimmed background around the detail card
    Scrim,
    /// Anywhere inside the detail card itself
    Content,
}

/// Result of handing a finished fetch back to the gallery
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// The response belonged to the current request and was applied
    Applied,
    /// A newer request superseded this one; nothing changed
    Stale,
}

/// Chooses the category shown on startup
pub trait CategoryPicker {
    fn pick(&mut self, choices: &[Category]) -> Option<Category>;
}

/// Uniform random choice
pub struct RandomPicker<R: rand::Rng = rand::rngs::ThreadRng> {
    rng: R,
}

impl RandomPicker {
    pub fn new() -> Self {
        Self {
            rng: rand::thread_rng(),
        }
    }
}

impl Default for RandomPicker {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: rand::Rng> CategoryPicker for RandomPicker<R> {
    fn pick(&mut self, choices: &[Category]) -> Option<Category> {
        choices.choose(&mut self.rng).copied()
    }
}

/// Always picks the same category, provided it is among the choices
#[derive(Debug, Clone, Copy)]
pub struct FixedPicker(pub Category);

impl CategoryPicker for FixedPicker {
    fn pick(&mut self, choices: &[Category]) -> Option<Category> {
        choices.contains(&self.0).then_some(self.0)
    }
}

/// Popup visibility. `Open` always carries the record being shown.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Popup<'a> {
    Closed,
    Open(&'a AnimalRecord),
}

/// All state for one browsing session
#[derive(Debug, Default)]
pub struct Gallery {
    selected_category: Option<Category>,
    records: Vec<AnimalRecord>,
    loading: bool,
    error_message: Option<String>,
    selected_record: Option<AnimalRecord>,
    current_request: Option<RequestId>,
    next_request: u64,
}

impl Gallery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select the startup category from the full set
    pub fn start(&mut self, picker: &mut impl CategoryPicker) -> Option<FetchRequest> {
        self.start_with(&Category::ALL, picker)
    }

    /// Select the startup category from `choices`
    pub fn start_with(
        &mut self,
        choices: &[Category],
        picker: &mut impl CategoryPicker,
    ) -> Option<FetchRequest> {
        let category = picker.pick(choices)?;
        tracing::debug!(%category, "picked startup category");
        self.select_category(CategoryInput::Raw(category.token().to_string()))
    }

    /// Switch to a category and start fetching it.
    ///
    /// Input that does not resolve to a known category is ignored.
    pub fn select_category(&mut self, input: CategoryInput) -> Option<FetchRequest> {
        let Some(category) = input.resolve() else {
            tracing::debug!(?input, "ignoring unknown category");
            return None;
        };

        self.selected_category = Some(category);
        self.error_message = None;
        Some(self.begin_fetch(category))
    }

    /// Fetch the selected category again
    pub fn refetch(&mut self) -> Option<FetchRequest> {
        let category = self.selected_category?;
        Some(self.begin_fetch(category))
    }

    fn begin_fetch(&mut self, category: Category) -> FetchRequest {
        self.next_request += 1;
        let id = RequestId(self.next_request);

        self.loading = true;
        self.error_message = None;
        self.current_request = Some(id);

        FetchRequest { id, category }
    }

    /// Apply the outcome of a fetch.
    ///
    /// Errors arrive already converted to a display string. A failed fetch
    /// keeps the previous records on screen.
    pub fn commit(
        &mut self,
        id: RequestId,
        result: Result<Vec<AnimalRecord>, String>,
    ) -> CommitOutcome {
        if self.current_request != Some(id) {
            tracing::debug!(?id, current = ?self.current_request, "discarding stale response");
            return CommitOutcome::Stale;
        }

        match result {
            Ok(records) => {
                tracing::info!(
                    count = records.len(),
                    category = ?self.selected_category,
                    "loaded records"
                );
                self.records = records;
            }
            Err(message) => {
                tracing::warn!(%message, "fetch failed");
                self.error_message = Some(message);
            }
        }

        self.loading = false;
        self.current_request = None;
        CommitOutcome::Applied
    }

    pub fn open_detail(&mut self, record: &AnimalRecord) {
        self.selected_record = Some(record.clone());
    }

    /// Close the popup. Returns false if it was already closed.
    pub fn close_detail(&mut self) -> bool {
        self.selected_record.take().is_some()
    }

    /// Background clicks close the popup, clicks on the card do not
    pub fn scrim_clicked(&mut self, origin: ClickOrigin) -> bool {
        match origin {
            ClickOrigin::Scrim => self.close_detail(),
            ClickOrigin::Content => false,
        }
    }

    pub fn escape_pressed(&mut self) -> bool {
        self.close_detail()
    }

    pub fn popup(&self) -> Popup<'_> {
        match &self.selected_record {
            Some(record) => Popup::Open(record),
            None => Popup::Closed,
        }
    }

    pub fn selected_record(&self) -> Option<&AnimalRecord> {
        self.selected_record.as_ref()
    }

    pub fn is_popup_open(&self) -> bool {
        self.selected_record.is_some()
    }

    pub fn selected_category(&self) -> Option<Category> {
        self.selected_category
    }

    pub fn records(&self) -> &[AnimalRecord] {
        &self.records
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::data::{RecordId, Submitter};

    fn record(id: i64, description: &str) -> AnimalRecord {
        AnimalRecord {
            id: RecordId::Number(id),
            image_url: format!("http://images.local/images/x/{}", id),
            description: description.to_string(),
            likes: id as u64,
            color: None,
            user: Submitter {
                name: "Ann".to_string(),
                location: Some("null".to_string()),
            },
        }
    }

    fn raw(token: &str) -> CategoryInput {
        CategoryInput::Raw(token.to_string())
    }

    #[test]
    fn test_every_category_loads() {
        for category in Category::ALL {
            let mut gallery = Gallery::new();
            let request = gallery.select_category(raw(category.token())).unwrap();
            assert_eq!(request.category, category);
            assert!(gallery.is_loading());

            let response = vec![record(1, category.token()), record(2, "second")];
            let outcome = gallery.commit(request.id, Ok(response.clone()));

            assert_eq!(outcome, CommitOutcome::Applied);
            assert_eq!(gallery.records(), response.as_slice());
            assert!(!gallery.is_loading());
            assert_eq!(gallery.selected_category(), Some(category));
        }
    }

    #[test]
    fn test_unknown_category_is_ignored() {
        let mut gallery = Gallery::new();
        let request = gallery.select_category(raw("dogs")).unwrap();
        gallery.commit(request.id, Err("offline".to_string()));

        assert_eq!(gallery.select_category(raw("dragons")), None);
        assert_eq!(gallery.select_category(CategoryInput::Event { value: None }), None);
        assert_eq!(
            gallery.select_category(CategoryInput::Event { value: Some("DOGS".to_string()) }),
            None
        );

        assert_eq!(gallery.selected_category(), Some(Category::Dogs));
        assert_eq!(gallery.error_message(), Some("offline"));
        assert!(!gallery.is_loading());
    }

    #[test]
    fn test_event_value_is_accepted() {
        let mut gallery = Gallery::new();
        let request = gallery
            .select_category(CategoryInput::Event { value: Some("horse".to_string()) })
            .unwrap();
        assert_eq!(request.category, Category::Horse);
    }

    #[test]
    fn test_selecting_clears_previous_error() {
        let mut gallery = Gallery::new();
        let first = gallery.select_category(raw("cats")).unwrap();
        gallery.commit(first.id, Err("boom".to_string()));
        assert!(gallery.error_message().is_some());

        gallery.select_category(raw("cow"));
        assert_eq!(gallery.error_message(), None);
    }

    #[test]
    fn test_startup_issues_one_fetch_for_picked_category() {
        let mut gallery = Gallery::new();
        let request = gallery
            .start_with(&[Category::Cats, Category::Dogs], &mut FixedPicker(Category::Dogs))
            .unwrap();

        assert_eq!(request.category, Category::Dogs);
        assert_eq!(gallery.selected_category(), Some(Category::Dogs));
        assert!(gallery.is_loading());
    }

    #[test]
    fn test_random_picker_stays_in_set() {
        let mut picker = RandomPicker::new();
        let choices = [Category::Fish, Category::Birds];
        for _ in 0..32 {
            let picked = picker.pick(&choices).unwrap();
            assert!(choices.contains(&picked));
        }
        assert_eq!(picker.pick(&[]), None);
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let mut gallery = Gallery::new();
        let cats = gallery.select_category(raw("cats")).unwrap();
        let fish = gallery.select_category(raw("fish")).unwrap();

        let fish_records = vec![record(5, "fish")];
        assert_eq!(gallery.commit(fish.id, Ok(fish_records.clone())), CommitOutcome::Applied);
        assert_eq!(
            gallery.commit(cats.id, Ok(vec![record(9, "cats")])),
            CommitOutcome::Stale
        );

        assert_eq!(gallery.records(), fish_records.as_slice());
        assert_eq!(gallery.selected_category(), Some(Category::Fish));
        assert!(!gallery.is_loading());
    }

    #[test]
    fn test_stale_response_keeps_newer_request_loading() {
        let mut gallery = Gallery::new();
        let cats = gallery.select_category(raw("cats")).unwrap();
        let _fish = gallery.select_category(raw("fish")).unwrap();

        assert_eq!(gallery.commit(cats.id, Err("late".to_string())), CommitOutcome::Stale);
        assert!(gallery.is_loading());
        assert_eq!(gallery.error_message(), None);
    }

    #[test]
    fn test_network_error_keeps_records() {
        let mut gallery = Gallery::new();
        let first = gallery.select_category(raw("birds")).unwrap();
        let existing = vec![record(1, "robin")];
        gallery.commit(first.id, Ok(existing.clone()));

        let retry = gallery.refetch().unwrap();
        assert_eq!(retry.category, Category::Birds);
        gallery.commit(retry.id, Err("error sending request".to_string()));

        assert_eq!(gallery.error_message(), Some("error sending request"));
        assert_eq!(gallery.records(), existing.as_slice());
        assert!(!gallery.is_loading());
    }

    #[test]
    fn test_refetch_without_category_does_nothing() {
        let mut gallery = Gallery::new();
        assert_eq!(gallery.refetch(), None);
        assert!(!gallery.is_loading());
    }

    #[test]
    fn test_unanswered_fetch_stays_loading() {
        let mut gallery = Gallery::new();
        gallery.select_category(raw("rabbit"));
        assert!(gallery.is_loading());
        assert!(gallery.records().is_empty());
    }

    #[test]
    fn test_popup_open_and_escape() {
        let mut gallery = Gallery::new();
        let chosen = record(3, "parrot");
        gallery.open_detail(&chosen);
        assert_eq!(gallery.popup(), Popup::Open(&chosen));

        assert!(gallery.escape_pressed());
        assert_eq!(gallery.popup(), Popup::Closed);
        assert!(!gallery.is_popup_open());
    }

    #[test]
    fn test_close_when_closed_is_noop() {
        let mut gallery = Gallery::new();
        assert!(!gallery.close_detail());
        assert!(!gallery.escape_pressed());
        assert_eq!(gallery.popup(), Popup::Closed);
    }

    #[test]
    fn test_only_scrim_clicks_close() {
        let mut gallery = Gallery::new();
        gallery.open_detail(&record(4, "pony"));

        assert!(!gallery.scrim_clicked(ClickOrigin::Content));
        assert!(gallery.is_popup_open());

        assert!(gallery.scrim_clicked(ClickOrigin::Scrim));
        assert!(!gallery.is_popup_open());
    }

    #[test]
    fn test_selected_record_survives_new_fetch() {
        let mut gallery = Gallery::new();
        let first = gallery.select_category(raw("cats")).unwrap();
        let kitten = record(1, "kitten");
        gallery.commit(first.id, Ok(vec![kitten.clone()]));
        gallery.open_detail(&gallery.records()[0].clone());

        let second = gallery.select_category(raw("dogs")).unwrap();
        gallery.commit(second.id, Ok(vec![record(2, "puppy")]));

        assert_eq!(gallery.popup(), Popup::Open(&kitten));
    }
}
