#![forbid(unsafe_code)]

//! Project dashboard card table.
//!
//! A compact table shown on project cards: a header row followed by body
//! rows, each row an ordered list of `(key, cell)` pairs. Columns share the
//! available width equally. A few keys get special treatment:
//!
//! - `name`: external links drop the `<project>-` prefix
//! - `status`: styled with `status_<value>`, or one glyph per entry for lists
//! - `type`: drawn with the function kind glyph

use mlui_core::geometry::Rect;
use mlui_render::frame::{Frame, HitId, HitRegion};
use mlui_style::{Style, StyleSheet};

use crate::{Widget, draw_text_span};

/// Value of a table cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellValue {
    Text(String),
    /// Several values, e.g. the states of a pipeline's steps.
    List(Vec<String>),
}

impl CellValue {
    fn as_text(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::List(values) => values.join(", "),
        }
    }
}

impl From<&str> for CellValue {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

/// One body cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableCell {
    pub value: CellValue,
    /// Space separated style classes.
    pub class_name: String,
    /// External link target.
    pub href: Option<String>,
    /// In-app route.
    pub link: Option<String>,
}

impl TableCell {
    pub fn new(value: impl Into<CellValue>) -> Self {
        Self {
            value: value.into(),
            class_name: String::new(),
            href: None,
            link: None,
        }
    }

    #[must_use]
    pub fn class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = class_name.into();
        self
    }

    #[must_use]
    pub fn href(mut self, href: impl Into<String>) -> Self {
        self.href = Some(href.into());
        self
    }

    #[must_use]
    pub fn link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }
}

/// One header cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableHeader {
    pub value: String,
    pub class_name: String,
}

impl TableHeader {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            class_name: String::new(),
        }
    }
}

/// Table contents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectTableData {
    pub header: Vec<TableHeader>,
    pub body: Vec<Vec<(String, TableCell)>>,
}

/// Text shown in a `name` cell.
///
/// External links carry the fully qualified name; the project prefix and
/// its separator character are dropped.
pub fn display_name<'a>(cell_value: &'a str, project_name: &str, external: bool) -> &'a str {
    match cell_value.strip_prefix(project_name) {
        Some(rest) if external => {
            let mut chars = rest.chars();
            chars.next();
            chars.as_str()
        }
        _ => cell_value,
    }
}

/// Style class of a scalar `status` cell.
pub fn status_class(status: &str) -> String {
    format!("status_{}", status.to_lowercase())
}

/// Glyph for a function kind.
pub fn type_glyph(kind: &str) -> char {
    match kind {
        "job" | "local" => '⚙',
        "serving" => '⇄',
        "nuclio" | "remote" => 'λ',
        "dask" => '⋔',
        "mpijob" | "spark" => '✦',
        "handler" => 'ƒ',
        _ => '•',
    }
}

/// Glyph for one entry of a status list.
const STATUS_GLYPH: char = '●';

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Renders a [`ProjectTableData`].
#[derive(Debug, Clone)]
pub struct ProjectTable<'a> {
    table: &'a ProjectTableData,
    project_name: &'a str,
    styles: &'a StyleSheet,
    hit_id: Option<HitId>,
}

impl<'a> ProjectTable<'a> {
    pub fn new(table: &'a ProjectTableData, project_name: &'a str, styles: &'a StyleSheet) -> Self {
        Self {
            table,
            project_name,
            styles,
            hit_id: None,
        }
    }

    /// Register each body row as a hit region carrying its row index.
    #[must_use]
    pub fn hit_id(mut self, id: HitId) -> Self {
        self.hit_id = Some(id);
        self
    }

    fn column_count(&self) -> usize {
        self.table
            .body
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(self.table.header.len()))
            .max()
            .unwrap_or(0)
    }

    fn class_style(&self, class_name: &str) -> Style {
        let names: Vec<&str> = class_name.split_whitespace().collect();
        self.styles.compose(&names)
    }

    fn render_cell(&self, frame: &mut Frame, area: Rect, key: &str, cell: &TableCell) {
        let base = self.class_style(&cell.class_name);
        let max_x = area.right();
        match (key, &cell.value) {
            ("type", value) => {
                let text = value.as_text();
                let glyph = type_glyph(&text).to_string();
                let x = draw_text_span(&mut frame.buffer, area.x, area.y, &glyph, base, max_x);
                draw_text_span(
                    &mut frame.buffer,
                    x.saturating_add(1),
                    area.y,
                    &text,
                    base,
                    max_x,
                );
            }
            ("status", CellValue::List(states)) => {
                let mut x = area.x;
                for state in states {
                    let style = self
                        .styles
                        .get_or_default(&format!("state-{state}-job"))
                        .merge(&base);
                    x = draw_text_span(
                        &mut frame.buffer,
                        x,
                        area.y,
                        &STATUS_GLYPH.to_string(),
                        style,
                        max_x,
                    );
                    if x >= max_x {
                        break;
                    }
                }
            }
            ("status", CellValue::Text(status)) => {
                let style = self
                    .styles
                    .get_or_default(&status_class(status))
                    .merge(&base);
                draw_text_span(&mut frame.buffer, area.x, area.y, &capitalize(status), style, max_x);
            }
            ("name", CellValue::Text(name)) => {
                let shown = display_name(name, self.project_name, cell.href.is_some());
                let style = self.styles.get_or_default("link").merge(&base);
                draw_text_span(&mut frame.buffer, area.x, area.y, shown, style, max_x);
            }
            (_, value) => {
                draw_text_span(&mut frame.buffer, area.x, area.y, &value.as_text(), base, max_x);
            }
        }
    }
}

impl Widget for ProjectTable<'_> {
    fn render(&self, area: Rect, frame: &mut Frame) {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "widget_render",
            widget = "ProjectTable",
            x = area.x,
            y = area.y,
            w = area.width,
            h = area.height,
            rows = self.table.body.len()
        )
        .entered();

        let columns = self.column_count();
        if area.is_empty() || columns == 0 {
            return;
        }
        let column_width = area.width / u16::try_from(columns).unwrap_or(u16::MAX);
        if column_width == 0 {
            return;
        }
        let column = |index: usize, y: u16| {
            let x = area.x + column_width * index as u16;
            Rect::new(x, y, column_width.saturating_sub(1), 1)
        };

        let header_style = self.styles.get_or_default("table-header__item").bold();
        for (index, header) in self.table.header.iter().enumerate() {
            let cell = column(index, area.y);
            let style = self.class_style(&header.class_name).merge(&header_style);
            draw_text_span(&mut frame.buffer, cell.x, cell.y, &header.value, style, cell.right());
        }

        for (row_index, row) in self.table.body.iter().enumerate() {
            let y = area.y.saturating_add(1).saturating_add(row_index as u16);
            if y >= area.bottom() {
                break;
            }
            for (index, (key, cell)) in row.iter().enumerate() {
                self.render_cell(frame, column(index, y), key, cell);
            }
            if let Some(id) = self.hit_id {
                frame.register_hit(Rect::new(area.x, y, area.width, 1), id, HitRegion::Row, row_index as u64);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ProjectTableData {
        ProjectTableData {
            header: vec![TableHeader::new("Name"), TableHeader::new("Status"), TableHeader::new("Type")],
            body: vec![
                vec![
                    ("name".into(), TableCell::new("churn-trainer").href("http://x")),
                    ("status".into(), TableCell::new("Running")),
                    ("type".into(), TableCell::new("job")),
                ],
                vec![
                    ("name".into(), TableCell::new("churn-server").link("/functions")),
                    (
                        "status".into(),
                        TableCell::new(CellValue::List(vec!["completed".into(), "error".into()])),
                    ),
                    ("type".into(), TableCell::new("serving")),
                ],
            ],
        }
    }

    #[test]
    fn name_prefix_is_stripped_for_links() {
        assert_eq!(display_name("churn-trainer", "churn", true), "trainer");
        assert_eq!(display_name("churn-trainer", "churn", false), "churn-trainer");
        assert_eq!(display_name("other-trainer", "churn", true), "other-trainer");
        assert_eq!(display_name("churn", "churn", true), "");
    }

    #[test]
    fn name_separator_may_be_multibyte() {
        assert_eq!(display_name("churné-trainer", "churn", true), "-trainer");
        assert_eq!(display_name("churn→serve", "churn", true), "serve");
    }

    #[test]
    fn status_class_is_lowercase() {
        assert_eq!(status_class("Running"), "status_running");
    }

    #[test]
    fn renders_header_and_rows() {
        let data = sample();
        let styles = StyleSheet::with_defaults();
        let mut frame = Frame::new(30, 3);
        ProjectTable::new(&data, "churn", &styles).render(frame.bounds(), &mut frame);
        assert_eq!(frame.buffer.row_text(0), "Name      Status    Type      ");
        assert_eq!(frame.buffer.row_text(1), "trainer   Running   ⚙ job     ");
        assert_eq!(frame.buffer.row_text(2), "churn-ser ●●        ⇄ serving ");
    }

    #[test]
    fn status_style_comes_from_class() {
        let data = sample();
        let styles = StyleSheet::with_defaults();
        let mut frame = Frame::new(30, 3);
        ProjectTable::new(&data, "churn", &styles).render(frame.bounds(), &mut frame);
        let expected = styles.get("status_running").and_then(|s| s.fg);
        assert_eq!(Some(frame.buffer.get(10, 1).unwrap().fg), expected);
    }

    #[test]
    fn rows_register_hits() {
        let data = sample();
        let styles = StyleSheet::new();
        let mut frame = Frame::with_hit_grid(30, 3);
        ProjectTable::new(&data, "churn", &styles)
            .hit_id(HitId::new(9))
            .render(frame.bounds(), &mut frame);
        assert_eq!(frame.hit_test(0, 2), Some((HitId::new(9), HitRegion::Row, 1)));
        assert_eq!(frame.hit_test(0, 0), None);
    }

    #[test]
    fn empty_table_draws_nothing() {
        let data = ProjectTableData::default();
        let styles = StyleSheet::new();
        let mut frame = Frame::new(5, 2);
        ProjectTable::new(&data, "p", &styles).render(frame.bounds(), &mut frame);
        assert_eq!(frame.buffer.row_text(0), "     ");
    }
}
