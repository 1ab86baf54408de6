pub mod table;

use askama::Template;

use crate::domain::resources::Resource;

use self::table::TableView;

#[derive(Clone)]
pub struct AdminBrandView {
    pub title: String,
}

#[derive(Clone)]
pub struct AdminNavigationItemView {
    pub label: String,
    pub href: String,
    pub is_active: bool,
}

#[derive(Clone)]
pub struct AdminNavigationView {
    pub items: Vec<AdminNavigationItemView>,
}

#[derive(Clone)]
pub struct AdminMetaView {
    pub title: String,
    pub description: String,
}

#[derive(Clone)]
pub struct AdminChrome {
    pub brand: AdminBrandView,
    pub navigation: AdminNavigationView,
    pub meta: AdminMetaView,
}

impl AdminChrome {
    /// Sidebar with every list screen, `active` highlighted.
    pub fn for_resource(active: Resource) -> Self {
        let items = Resource::ALL
            .into_iter()
            .map(|resource| AdminNavigationItemView {
                label: resource.title().to_string(),
                href: format!("/{}", resource.slug()),
                is_active: resource == active,
            })
            .collect();

        Self {
            brand: AdminBrandView {
                title: "Reelboard".to_string(),
            },
            navigation: AdminNavigationView { items },
            meta: AdminMetaView {
                title: format!("{} · Reelboard", active.title()),
                description: "Контент удирдлагын самбар".to_string(),
            },
        }
    }
}

#[derive(Clone)]
pub struct AdminLayout<T> {
    pub chrome: AdminChrome,
    pub asset_version: String,
    pub content: T,
}

impl<T> AdminLayout<T> {
    pub fn new(chrome: AdminChrome, content: T) -> Self {
        Self {
            chrome,
            asset_version: asset_version(),
            content,
        }
    }
}

fn asset_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[derive(Clone, Debug)]
pub struct AdminHiddenField {
    pub name: String,
    pub value: String,
}

impl AdminHiddenField {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct AdminSearchChoiceView {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

/// Page-owned search input submitted with a plain GET.
#[derive(Clone, Debug)]
pub struct AdminSearchFieldView {
    pub name: String,
    pub label: String,
    pub value: String,
    pub choices: Vec<AdminSearchChoiceView>,
}

impl AdminSearchFieldView {
    pub fn has_choices(&self) -> bool {
        !self.choices.is_empty()
    }
}

/// Everything the panel form re-posts on each table interaction.
#[derive(Clone, Debug)]
pub struct AdminListPanelView {
    pub slug: String,
    pub panel_action: String,
    pub more_action: String,
    pub state_fields: Vec<AdminHiddenField>,
    pub table: TableView,
}

impl AdminListPanelView {
    pub fn action(&self, name: &str) -> String {
        format!("{}?action={name}", self.panel_action)
    }

    pub fn column_action(&self, name: &str, column: &str) -> String {
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        serializer.append_pair("action", name);
        serializer.append_pair("column", column);
        format!("{}?{}", self.panel_action, serializer.finish())
    }
}

#[derive(Clone, Debug)]
pub struct AdminListView {
    pub heading: String,
    pub search_action: String,
    pub search_fields: Vec<AdminSearchFieldView>,
    pub panel: AdminListPanelView,
}

impl AdminListView {
    pub fn has_search(&self) -> bool {
        !self.search_fields.is_empty()
    }
}

#[derive(Template)]
#[template(path = "admin/list.html")]
pub struct AdminListTemplate {
    pub view: AdminLayout<AdminListView>,
}

#[derive(Template)]
#[template(path = "admin/list_panel.html")]
pub struct AdminListPanelTemplate {
    pub content: AdminListPanelView,
}
