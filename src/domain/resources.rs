//! Dashboard list screens and their column schemas.

use std::fmt;
use std::str::FromStr;

use reelboard_api_types::JsonRow;
use serde_json::Value;

use super::error::DomainError;
use super::table::{BadgeTone, Column, ColumnDescriptor, DisplayValue};

/// Backend collections the dashboard lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Movies,
    Categories,
    Genres,
    Tags,
    Employees,
    Banners,
    Subscriptions,
    Rentals,
}

/// How a screen pages through its rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Listing {
    Paged,
    /// Short lists rendered without a pagination region.
    Unpaginated,
    /// "Load more" appending instead of page buttons.
    Infinite,
}

/// Page-managed filter stored under its own `filters.<name>` query key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NamespacedFilter {
    pub name: &'static str,
    pub label: &'static str,
    pub choices: &'static [(&'static str, &'static str)],
}

#[derive(Debug, Clone, Copy)]
enum FieldKind {
    Text,
    Number,
    Money,
    Flag,
    Enum(&'static [(&'static str, &'static str, BadgeTone)]),
}

#[derive(Debug, Clone, Copy)]
struct ColumnSpec {
    id: &'static str,
    header: &'static str,
    kind: FieldKind,
    sortable: bool,
    filterable: bool,
    hideable: bool,
}

const fn spec(id: &'static str, header: &'static str, kind: FieldKind) -> ColumnSpec {
    ColumnSpec {
        id,
        header,
        kind,
        sortable: false,
        filterable: false,
        hideable: true,
    }
}

impl ColumnSpec {
    const fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    const fn filterable(mut self) -> Self {
        self.filterable = true;
        self
    }

    const fn pinned(mut self) -> Self {
        self.hideable = false;
        self
    }
}

const MOVIE_TYPES: &[(&str, &str, BadgeTone)] = &[
    ("movie", "Кино", BadgeTone::Neutral),
    ("series", "Цуврал", BadgeTone::Neutral),
];

const PUBLISH_STATES: &[(&str, &str, BadgeTone)] = &[
    ("published", "Нийтлэгдсэн", BadgeTone::Positive),
    ("draft", "Ноорог", BadgeTone::Warning),
    ("archived", "Архивласан", BadgeTone::Neutral),
];

const EMPLOYEE_ROLES: &[(&str, &str, BadgeTone)] = &[
    ("admin", "Админ", BadgeTone::Negative),
    ("editor", "Редактор", BadgeTone::Positive),
    ("support", "Туслах", BadgeTone::Neutral),
];

const SUBSCRIPTION_STATES: &[(&str, &str, BadgeTone)] = &[
    ("active", "Идэвхтэй", BadgeTone::Positive),
    ("expired", "Дууссан", BadgeTone::Neutral),
    ("cancelled", "Цуцалсан", BadgeTone::Negative),
];

const MOVIE_COLUMNS: &[ColumnSpec] = &[
    spec("id", "ID", FieldKind::Number).pinned(),
    spec("title", "Гарчиг", FieldKind::Text).sortable().pinned(),
    spec("type", "Төрөл", FieldKind::Enum(MOVIE_TYPES)),
    spec("year", "Он", FieldKind::Number).sortable(),
    spec("status", "Төлөв", FieldKind::Enum(PUBLISH_STATES)).filterable(),
    spec("created_at", "Үүсгэсэн", FieldKind::Text).sortable(),
];

const CATEGORY_COLUMNS: &[ColumnSpec] = &[
    spec("id", "ID", FieldKind::Number).pinned(),
    spec("name", "Нэр", FieldKind::Text)
        .sortable()
        .filterable()
        .pinned(),
    spec("slug", "Slug", FieldKind::Text).filterable(),
    spec("movie_count", "Кино", FieldKind::Number).sortable(),
];

const GENRE_COLUMNS: &[ColumnSpec] = &[
    spec("id", "ID", FieldKind::Number).pinned(),
    spec("name", "Нэр", FieldKind::Text).sortable().pinned(),
];

const TAG_COLUMNS: &[ColumnSpec] = &[
    spec("id", "ID", FieldKind::Number).pinned(),
    spec("name", "Нэр", FieldKind::Text)
        .sortable()
        .filterable()
        .pinned(),
    spec("usage_count", "Ашиглалт", FieldKind::Number).sortable(),
];

const EMPLOYEE_COLUMNS: &[ColumnSpec] = &[
    spec("id", "ID", FieldKind::Number).pinned(),
    spec("name", "Нэр", FieldKind::Text)
        .sortable()
        .filterable()
        .pinned(),
    spec("email", "И-мэйл", FieldKind::Text).filterable(),
    spec("role", "Эрх", FieldKind::Enum(EMPLOYEE_ROLES)).filterable(),
    spec("active", "Идэвхтэй", FieldKind::Flag),
];

const BANNER_COLUMNS: &[ColumnSpec] = &[
    spec("id", "ID", FieldKind::Number).pinned(),
    spec("title", "Гарчиг", FieldKind::Text)
        .filterable()
        .pinned(),
    spec("placement", "Байршил", FieldKind::Text).filterable(),
    spec("active", "Идэвхтэй", FieldKind::Flag),
    spec("starts_at", "Эхлэх", FieldKind::Text).sortable(),
    spec("ends_at", "Дуусах", FieldKind::Text).sortable(),
];

const SUBSCRIPTION_COLUMNS: &[ColumnSpec] = &[
    spec("id", "ID", FieldKind::Number).pinned(),
    spec("user_email", "Хэрэглэгч", FieldKind::Text).filterable(),
    spec("plan", "Багц", FieldKind::Text).filterable(),
    spec("amount", "Дүн", FieldKind::Money).sortable(),
    spec("status", "Төлөв", FieldKind::Enum(SUBSCRIPTION_STATES)).filterable(),
    spec("started_at", "Эхэлсэн", FieldKind::Text).sortable(),
];

const RENTAL_COLUMNS: &[ColumnSpec] = &[
    spec("id", "ID", FieldKind::Number).pinned(),
    spec("user_email", "Хэрэглэгч", FieldKind::Text),
    spec("movie_title", "Кино", FieldKind::Text),
    spec("amount", "Дүн", FieldKind::Money),
    spec("rented_at", "Түрээсэлсэн", FieldKind::Text),
];

const MOVIE_FILTERS: &[NamespacedFilter] = &[
    NamespacedFilter {
        name: "title",
        label: "Гарчиг",
        choices: &[],
    },
    NamespacedFilter {
        name: "type",
        label: "Төрөл",
        choices: &[("movie", "Кино"), ("series", "Цуврал")],
    },
];

impl Resource {
    pub const ALL: [Resource; 8] = [
        Resource::Movies,
        Resource::Categories,
        Resource::Genres,
        Resource::Tags,
        Resource::Employees,
        Resource::Banners,
        Resource::Subscriptions,
        Resource::Rentals,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            Resource::Movies => "movies",
            Resource::Categories => "categories",
            Resource::Genres => "genres",
            Resource::Tags => "tags",
            Resource::Employees => "employees",
            Resource::Banners => "banners",
            Resource::Subscriptions => "subscriptions",
            Resource::Rentals => "rentals",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Resource::Movies => "Кинонууд",
            Resource::Categories => "Ангилал",
            Resource::Genres => "Жанр",
            Resource::Tags => "Шошго",
            Resource::Employees => "Ажилтнууд",
            Resource::Banners => "Баннер",
            Resource::Subscriptions => "Захиалга",
            Resource::Rentals => "Түрээс",
        }
    }

    pub fn listing(self) -> Listing {
        match self {
            Resource::Genres => Listing::Unpaginated,
            Resource::Rentals => Listing::Infinite,
            _ => Listing::Paged,
        }
    }

    /// Screens that own their query string keep the table from rewriting it.
    pub fn url_updates(self) -> bool {
        !matches!(self, Resource::Movies)
    }

    pub fn namespaced_filters(self) -> &'static [NamespacedFilter] {
        match self {
            Resource::Movies => MOVIE_FILTERS,
            _ => &[],
        }
    }

    pub fn columns(self) -> Vec<Column<JsonRow>> {
        self.specs().iter().copied().map(build_column).collect()
    }

    /// Columns boxed for the table controller.
    pub fn descriptors(self) -> Vec<Box<dyn ColumnDescriptor<JsonRow>>> {
        self.columns()
            .into_iter()
            .map(|column| Box::new(column) as Box<dyn ColumnDescriptor<JsonRow>>)
            .collect()
    }

    fn specs(self) -> &'static [ColumnSpec] {
        match self {
            Resource::Movies => MOVIE_COLUMNS,
            Resource::Categories => CATEGORY_COLUMNS,
            Resource::Genres => GENRE_COLUMNS,
            Resource::Tags => TAG_COLUMNS,
            Resource::Employees => EMPLOYEE_COLUMNS,
            Resource::Banners => BANNER_COLUMNS,
            Resource::Subscriptions => SUBSCRIPTION_COLUMNS,
            Resource::Rentals => RENTAL_COLUMNS,
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for Resource {
    type Err = DomainError;

    fn from_str(slug: &str) -> Result<Self, Self::Err> {
        Resource::ALL
            .into_iter()
            .find(|resource| resource.slug() == slug)
            .ok_or_else(|| DomainError::unknown_resource(slug))
    }
}

fn build_column(spec: ColumnSpec) -> Column<JsonRow> {
    let ColumnSpec {
        id,
        header,
        kind,
        sortable,
        filterable,
        hideable,
    } = spec;

    Column::new(id, move |row: &JsonRow| render_field(row.get(id), kind))
        .header(header)
        .enable_sorting(sortable)
        .enable_column_filter(filterable)
        .enable_hiding(hideable)
}

fn render_field(value: Option<&Value>, kind: FieldKind) -> DisplayValue {
    let Some(value) = value.filter(|value| !value.is_null()) else {
        return DisplayValue::Empty;
    };

    match kind {
        FieldKind::Text | FieldKind::Number => DisplayValue::Text(plain_text(value)),
        FieldKind::Money => match value.as_i64() {
            Some(amount) => DisplayValue::Text(format!("{}₮", group_thousands(amount))),
            None => DisplayValue::Text(plain_text(value)),
        },
        FieldKind::Flag => match value.as_bool() {
            Some(true) => DisplayValue::badge("Тийм", BadgeTone::Positive),
            Some(false) => DisplayValue::badge("Үгүй", BadgeTone::Neutral),
            None => DisplayValue::Text(plain_text(value)),
        },
        FieldKind::Enum(labels) => {
            let raw = plain_text(value);
            match labels.iter().find(|(key, _, _)| *key == raw) {
                Some((_, label, tone)) => DisplayValue::badge(*label, *tone),
                None => DisplayValue::badge(raw, BadgeTone::Neutral),
            }
        }
    }
}

/// Strings without quotes, everything else in its JSON form.
pub(crate) fn plain_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn group_thousands(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    if amount < 0 {
        grouped.insert(0, '-');
    }
    grouped
}
