//! Patient table ordering and pagination.

use crate::constants::DEFAULT_PAGE_SIZE;
use crate::Patient;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::str::FromStr;

/// Column the patient table is ordered by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    Name,
    Age,
    HccScore,
    #[default]
    RiskTier,
    #[serde(rename = "lastEDVisit")]
    LastEdVisit,
}

impl SortField {
    pub const ALL: [SortField; 5] = [
        SortField::Name,
        SortField::Age,
        SortField::HccScore,
        SortField::RiskTier,
        SortField::LastEdVisit,
    ];

    /// Column heading shown in the table.
    pub fn heading(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Age => "Age",
            Self::HccScore => "HCC Score",
            Self::RiskTier => "Risk Tier",
            Self::LastEdVisit => "Last ED Visit",
        }
    }
}

/// Accepts camelCase, kebab-case or snake_case spellings, e.g. `hccScore`, `hcc-score`.
impl FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .flat_map(char::to_lowercase)
            .collect();
        match key.as_str() {
            "name" => Ok(Self::Name),
            "age" => Ok(Self::Age),
            "hccscore" | "hcc" => Ok(Self::HccScore),
            "risktier" | "tier" => Ok(Self::RiskTier),
            "lastedvisit" | "edvisit" => Ok(Self::LastEdVisit),
            _ => Err(format!(
                "unknown sort field '{s}' (expected name, age, hcc-score, risk-tier or last-ed-visit)"
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortDirection {
    #[default]
    #[serde(rename = "asc")]
    Ascending,
    #[serde(rename = "desc")]
    Descending,
}

impl SortDirection {
    pub fn is_descending(self) -> bool {
        self == Self::Descending
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

/// Case-insensitive comparison, so "adams" sorts next to "Adams". Names differing only in
/// case put the lowercase spelling first, which keeps the order total.
fn compare_names(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
        .then_with(|| b.cmp(a))
}

/// Ascending comparison on a single column.
pub fn compare_by(a: &Patient, b: &Patient, field: SortField) -> Ordering {
    match field {
        SortField::Name => compare_names(&a.name, &b.name),
        SortField::Age => a.age.cmp(&b.age),
        SortField::HccScore => a.hcc_score.total_cmp(&b.hcc_score),
        SortField::RiskTier => a.risk_tier.cmp(&b.risk_tier),
        SortField::LastEdVisit => a.last_ed_visit.cmp(&b.last_ed_visit),
    }
}

/// Orders table rows by `field` in `direction`.
///
/// Only the row references move; the patients themselves are untouched. Direction applies
/// to the chosen column only, and rows with equal keys are always ordered by patient id
/// ascending.
pub fn sort_rows(rows: &mut [&Patient], field: SortField, direction: SortDirection) {
    rows.sort_by(|a, b| {
        let primary = compare_by(a, b, field);
        let primary = match direction {
            SortDirection::Ascending => primary,
            SortDirection::Descending => primary.reverse(),
        };
        primary.then_with(|| a.id.cmp(&b.id))
    });
}

/// Returns the patients ordered by `field` in `direction`. See [`sort_rows`].
pub fn sort_patients<'a, P>(patients: &'a [P], field: SortField, direction: SortDirection) -> Vec<&'a Patient>
where
    P: Borrow<Patient>,
{
    let mut sorted: Vec<&Patient> = patients.iter().map(<P as Borrow<Patient>>::borrow).collect();
    sort_rows(&mut sorted, field, direction);
    sorted
}

/// `ceil(count / page_size)`; zero rows means zero pages.
pub fn total_pages(count: usize, page_size: usize) -> usize {
    count.div_ceil(page_size.max(1))
}

/// Clamps a requested page into `1..=max(total_pages, 1)`.
pub fn clamp_page(page_number: usize, total_pages: usize) -> usize {
    page_number.clamp(1, total_pages.max(1))
}

/// One page of the patient table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<'a> {
    pub items: Vec<&'a Patient>,
    /// The page actually shown, after clamping.
    pub page_number: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

impl Page<'_> {
    /// 1-based index of the first row on this page, 0 when the table is empty.
    pub fn first_item(&self) -> usize {
        if self.items.is_empty() {
            0
        } else {
            (self.page_number - 1) * self.page_size + 1
        }
    }

    /// 1-based index of the last row on this page, 0 when the table is empty.
    pub fn last_item(&self) -> usize {
        (self.page_number * self.page_size).min(self.total_items)
    }

    pub fn has_previous(&self) -> bool {
        self.page_number > 1
    }

    pub fn has_next(&self) -> bool {
        self.page_number < self.total_pages
    }

    /// Footer text, e.g. "Showing 11 to 20 of 23 patients".
    pub fn range_label(&self) -> String {
        format!(
            "Showing {} to {} of {} patients",
            self.first_item(),
            self.last_item(),
            self.total_items
        )
    }
}

/// Slices one page out of already-ordered rows.
///
/// Out-of-range page numbers are clamped rather than producing an empty page, and a
/// `page_size` of zero is treated as one.
pub fn paginate(rows: Vec<&Patient>, page_number: usize, page_size: usize) -> Page<'_> {
    let page_size = page_size.max(1);
    let total_items = rows.len();
    let total_pages = total_pages(total_items, page_size);
    let page_number = clamp_page(page_number, total_pages);

    let items = rows
        .into_iter()
        .skip((page_number - 1) * page_size)
        .take(page_size)
        .collect();

    Page {
        items,
        page_number,
        page_size,
        total_pages,
        total_items,
    }
}

/// Sorts `patients` and slices out one page. See [`sort_rows`] and [`paginate`].
pub fn sort_and_page<'a, P>(
    patients: &'a [P],
    field: SortField,
    direction: SortDirection,
    page_number: usize,
    page_size: usize,
) -> Page<'a>
where
    P: Borrow<Patient>,
{
    paginate(sort_patients(patients, field, direction), page_number, page_size)
}

/// Sort and page controls of the patient table.
///
/// Starts on page 1 ordered by risk tier, ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableState {
    pub sort_field: SortField,
    pub sort_direction: SortDirection,
    pub page: usize,
    pub page_size: usize,
}

impl Default for TableState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl TableState {
    pub fn new(page_size: usize) -> Self {
        Self {
            sort_field: SortField::default(),
            sort_direction: SortDirection::default(),
            page: 1,
            page_size: page_size.max(1),
        }
    }

    /// Column header click: the active column flips direction, a new column starts ascending.
    pub fn toggle_sort(&mut self, field: SortField) {
        if self.sort_field == field {
            self.sort_direction = self.sort_direction.toggled();
        } else {
            self.sort_field = field;
            self.sort_direction = SortDirection::Ascending;
        }
    }

    pub fn next_page(&mut self, total_pages: usize) {
        self.page = clamp_page(self.page + 1, total_pages);
    }

    pub fn previous_page(&mut self) {
        self.page = self.page.saturating_sub(1).max(1);
    }

    /// Requests a page; the request is clamped on the next [`TableState::view`].
    pub fn go_to_page(&mut self, page: usize) {
        self.page = page;
    }

    /// Renders the current page of `rows` and stores the clamped page number back into
    /// the state.
    pub fn view<'a>(&mut self, mut rows: Vec<&'a Patient>) -> Page<'a> {
        sort_rows(&mut rows, self.sort_field, self.sort_direction);
        let page = paginate(rows, self.page, self.page_size);
        self.page = page.page_number;
        page
    }
}
