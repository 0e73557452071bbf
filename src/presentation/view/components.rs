//! The component tree a default screen renders.
//!
//! A [`Surface`] is a flat, ordered list of nodes laid out top-to-bottom.
//! Rendering records each node's area so pointer input can be hit-tested
//! against the last drawn frame. Tab and list nodes carry group names; the
//! stack auto-wires selection behavior for them when the screen is prepared.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use crate::presentation::widgets::TextInput;

/// What a node is and renders as.
#[derive(Debug, Clone)]
pub enum NodeKind {
    /// Bold screen title across the top.
    Titlebar(String),
    /// Static wrapped text.
    Label(String),
    /// Editable text field.
    Field(TextInput),
    /// Pressable bordered button.
    Button(String),
    /// One tab header; consecutive tabs of a group share a row.
    Tab {
        /// Tab group this header belongs to.
        group: &'static str,
        /// Stable name used to pair the tab with its pane.
        name: &'static str,
        /// Header text.
        label: String,
    },
    /// Scrollable text body paired with a tab.
    Pane {
        /// Tab group this pane belongs to.
        group: &'static str,
        /// Name of the tab that shows this pane.
        tab: &'static str,
        /// Body text.
        text: String,
        /// Vertical scroll position in rows.
        scroll: u16,
    },
    /// One selectable row of a list group.
    Item {
        /// List group this row belongs to.
        group: &'static str,
        /// Stable name reported on selection.
        name: &'static str,
        /// Row text.
        label: String,
    },
    /// Fixed vertical gap.
    Spacer(u16),
}

/// One node of a surface.
#[derive(Debug, Clone)]
pub struct Node {
    /// Wiring id, unique within the surface by convention.
    pub id: Option<&'static str>,
    /// Wiring class, shared across nodes.
    pub class: Option<&'static str>,
    /// Kind and kind-specific state.
    pub kind: NodeKind,
    /// Hidden nodes take no layout space and no input.
    pub hidden: bool,
    /// Selection state for tabs and items.
    pub selected: bool,
    /// Area occupied at the last render.
    pub area: Rect,
}

impl Node {
    fn new(kind: NodeKind) -> Self {
        Self {
            id: None,
            class: None,
            kind,
            hidden: false,
            selected: false,
            area: Rect::ZERO,
        }
    }

    /// A bold title row.
    #[must_use]
    pub fn titlebar(title: impl Into<String>) -> Self {
        Self::new(NodeKind::Titlebar(title.into()))
    }

    /// A static text block.
    #[must_use]
    pub fn label(text: impl Into<String>) -> Self {
        Self::new(NodeKind::Label(text.into()))
    }

    /// An editable field.
    #[must_use]
    pub fn field(input: TextInput) -> Self {
        Self::new(NodeKind::Field(input))
    }

    /// A pressable button.
    #[must_use]
    pub fn button(label: impl Into<String>) -> Self {
        Self::new(NodeKind::Button(label.into()))
    }

    /// A tab header within `group`.
    #[must_use]
    pub fn tab(group: &'static str, name: &'static str, label: impl Into<String>) -> Self {
        Self::new(NodeKind::Tab {
            group,
            name,
            label: label.into(),
        })
    }

    /// The pane shown when `tab` of `group` is selected.
    #[must_use]
    pub fn pane(group: &'static str, tab: &'static str, text: impl Into<String>) -> Self {
        Self::new(NodeKind::Pane {
            group,
            tab,
            text: text.into(),
            scroll: 0,
        })
    }

    /// A selectable list row within `group`.
    #[must_use]
    pub fn item(group: &'static str, name: &'static str, label: impl Into<String>) -> Self {
        Self::new(NodeKind::Item {
            group,
            name,
            label: label.into(),
        })
    }

    /// A fixed vertical gap of `rows`.
    #[must_use]
    pub fn spacer(rows: u16) -> Self {
        Self::new(NodeKind::Spacer(rows))
    }

    /// Assigns a wiring id.
    #[must_use]
    pub fn with_id(mut self, id: &'static str) -> Self {
        self.id = Some(id);
        self
    }

    /// Assigns a wiring class.
    #[must_use]
    pub fn with_class(mut self, class: &'static str) -> Self {
        self.class = Some(class);
        self
    }

    /// Starts the node hidden.
    #[must_use]
    pub fn start_hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    /// Whether keyboard focus can land on this node.
    #[must_use]
    pub fn is_focusable(&self) -> bool {
        !self.hidden
            && matches!(
                self.kind,
                NodeKind::Field(_) | NodeKind::Button(_) | NodeKind::Tab { .. } | NodeKind::Item { .. }
            )
    }

    fn fixed_height(&self) -> Option<u16> {
        if self.hidden {
            return Some(0);
        }
        match &self.kind {
            NodeKind::Titlebar(_) | NodeKind::Tab { .. } | NodeKind::Item { .. } => Some(1),
            NodeKind::Label(text) => {
                Some(u16::try_from(text.lines().count().max(1)).unwrap_or(u16::MAX))
            }
            NodeKind::Field(_) | NodeKind::Button(_) => Some(3),
            NodeKind::Spacer(rows) => Some(*rows),
            NodeKind::Pane { .. } => None,
        }
    }
}

/// An ordered component tree with a focus cursor.
#[derive(Debug, Clone, Default)]
pub struct Surface {
    nodes: Vec<Node>,
    focus: Option<usize>,
}

impl Surface {
    /// Creates an empty surface.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a node, returning its index.
    pub fn add(&mut self, node: Node) -> usize {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    /// Number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns whether the surface has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Borrows the node at `index`.
    #[must_use]
    pub fn node(&self, index: usize) -> Option<&Node> {
        self.nodes.get(index)
    }

    /// Mutably borrows the node at `index`.
    pub fn node_mut(&mut self, index: usize) -> Option<&mut Node> {
        self.nodes.get_mut(index)
    }

    /// Finds the first node with the given id.
    #[must_use]
    pub fn find_id(&self, id: &str) -> Option<usize> {
        self.nodes.iter().position(|n| n.id == Some(id))
    }

    /// Iterates nodes with their indices.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Node)> {
        self.nodes.iter().enumerate()
    }

    /// Hit-tests a viewport position against the last rendered frame.
    #[must_use]
    pub fn node_at(&self, position: Position) -> Option<usize> {
        self.nodes
            .iter()
            .enumerate()
            .rev()
            .find(|(_, n)| !n.hidden && n.area.contains(position))
            .map(|(i, _)| i)
    }

    /// Current focus index.
    #[must_use]
    pub fn focus(&self) -> Option<usize> {
        self.focus
    }

    /// Moves focus to `index` if the node accepts it.
    pub fn set_focus(&mut self, index: usize) {
        if self.nodes.get(index).is_some_and(Node::is_focusable) {
            self.focus = Some(index);
            self.sync_field_focus();
        }
    }

    /// Drops focus.
    pub fn blur(&mut self) {
        self.focus = None;
        self.sync_field_focus();
    }

    /// Moves focus to the next focusable node, wrapping.
    pub fn focus_next(&mut self) {
        self.cycle_focus(1);
    }

    /// Moves focus to the previous focusable node, wrapping.
    pub fn focus_prev(&mut self) {
        self.cycle_focus(-1);
    }

    fn cycle_focus(&mut self, step: isize) {
        let count = self.nodes.len();
        if count == 0 {
            return;
        }
        let start = self.focus.map_or_else(
            || if step > 0 { count - 1 } else { 0 },
            |f| f,
        );
        let mut index = start;
        for _ in 0..count {
            index = (index as isize + step).rem_euclid(count as isize) as usize;
            if self.nodes[index].is_focusable() {
                self.focus = Some(index);
                self.sync_field_focus();
                return;
            }
        }
    }

    fn sync_field_focus(&mut self) {
        let focus = self.focus;
        for (i, node) in self.nodes.iter_mut().enumerate() {
            if let NodeKind::Field(input) = &mut node.kind {
                input.set_focused(focus == Some(i));
            }
        }
    }

    /// Mutably borrows the focused field's input, if a field is focused.
    pub fn focused_field_mut(&mut self) -> Option<&mut TextInput> {
        let index = self.focus?;
        match &mut self.nodes.get_mut(index)?.kind {
            NodeKind::Field(input) => Some(input),
            _ => None,
        }
    }

    /// Returns the value of the field with the given id.
    #[must_use]
    pub fn field_value(&self, id: &str) -> Option<&str> {
        let index = self.find_id(id)?;
        match &self.nodes[index].kind {
            NodeKind::Field(input) => Some(input.value()),
            _ => None,
        }
    }

    /// Selects the tab at `index`: deselects its group siblings and shows
    /// only the pane paired with it.
    pub fn select_tab(&mut self, index: usize) {
        let NodeKind::Tab { group, name, .. } = self.nodes[index].kind else {
            return;
        };
        for node in &mut self.nodes {
            match &mut node.kind {
                NodeKind::Tab { group: g, .. } if *g == group => {
                    node.selected = false;
                }
                NodeKind::Pane { group: g, tab, scroll, .. } if *g == group => {
                    node.hidden = *tab != name;
                    // A freshly exposed pane starts at the top.
                    *scroll = 0;
                }
                _ => {}
            }
        }
        self.nodes[index].selected = true;
    }

    /// Name of the selected tab in `group`.
    #[must_use]
    pub fn selected_tab(&self, group: &str) -> Option<&'static str> {
        self.nodes.iter().find_map(|n| match n.kind {
            NodeKind::Tab { group: g, name, .. } if g == group && n.selected => Some(name),
            _ => None,
        })
    }

    /// Selects the item at `index`, deselecting its group siblings.
    pub fn select_item(&mut self, index: usize) {
        let NodeKind::Item { group, .. } = self.nodes[index].kind else {
            return;
        };
        for node in &mut self.nodes {
            if let NodeKind::Item { group: g, .. } = node.kind {
                if g == group {
                    node.selected = false;
                }
            }
        }
        self.nodes[index].selected = true;
    }

    /// Name of the selected item in `group`.
    #[must_use]
    pub fn selected_item(&self, group: &str) -> Option<&'static str> {
        self.nodes.iter().find_map(|n| match n.kind {
            NodeKind::Item { group: g, name, .. } if g == group && n.selected => Some(name),
            _ => None,
        })
    }

    /// Rewinds every pane's scroll to the top.
    pub fn reset_scroll(&mut self) {
        for node in &mut self.nodes {
            if let NodeKind::Pane { scroll, .. } = &mut node.kind {
                *scroll = 0;
            }
        }
    }

    /// Scrolls the first visible pane by `delta` rows.
    pub fn scroll_pane(&mut self, delta: i32) {
        for node in &mut self.nodes {
            if node.hidden {
                continue;
            }
            if let NodeKind::Pane { scroll, .. } = &mut node.kind {
                let next = (i32::from(*scroll) + delta).clamp(0, i32::from(u16::MAX));
                *scroll = u16::try_from(next).unwrap_or(0);
                return;
            }
        }
    }

    /// Lays out and renders every visible node, recording node areas.
    ///
    /// Consecutive visible tabs of the same group share one row split
    /// evenly; a pane takes whatever vertical space remains.
    pub fn render(&mut self, area: Rect, buf: &mut Buffer) {
        enum Row {
            Single(usize),
            TabRun(Vec<usize>),
        }

        let mut rows: Vec<(Row, Constraint)> = Vec::new();
        let mut i = 0;
        while i < self.nodes.len() {
            let node = &self.nodes[i];
            if let NodeKind::Tab { group, .. } = node.kind {
                if !node.hidden {
                    let mut run = vec![i];
                    while let Some(next) = self.nodes.get(run.last().copied().unwrap_or(i) + 1) {
                        match next.kind {
                            NodeKind::Tab { group: g, .. } if g == group && !next.hidden => {
                                run.push(run.last().copied().unwrap_or(i) + 1);
                            }
                            _ => break,
                        }
                    }
                    i = run.last().copied().unwrap_or(i) + 1;
                    rows.push((Row::TabRun(run), Constraint::Length(1)));
                    continue;
                }
            }
            let constraint = node
                .fixed_height()
                .map_or(Constraint::Min(0), Constraint::Length);
            rows.push((Row::Single(i), constraint));
            i += 1;
        }

        let constraints: Vec<Constraint> = rows.iter().map(|(_, c)| *c).collect();
        let slots = Layout::vertical(constraints).split(area);

        for node in &mut self.nodes {
            node.area = Rect::ZERO;
        }

        for ((row, _), slot) in rows.iter().zip(slots.iter()) {
            match row {
                Row::Single(index) => {
                    self.nodes[*index].area = *slot;
                    self.render_node(*index, *slot, buf);
                }
                Row::TabRun(indices) => {
                    let cells = Layout::horizontal(
                        indices
                            .iter()
                            .map(|_| Constraint::Ratio(1, indices.len() as u32)),
                    )
                    .split(*slot);
                    for (index, cell) in indices.iter().zip(cells.iter()) {
                        self.nodes[*index].area = *cell;
                        self.render_node(*index, *cell, buf);
                    }
                }
            }
        }
    }

    #[allow(clippy::too_many_lines)]
    fn render_node(&mut self, index: usize, area: Rect, buf: &mut Buffer) {
        if area.is_empty() || self.nodes[index].hidden {
            return;
        }
        let focused = self.focus == Some(index);
        let node = &self.nodes[index];
        match &node.kind {
            NodeKind::Titlebar(title) => {
                Paragraph::new(Line::styled(
                    title.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                ))
                .alignment(Alignment::Center)
                .render(area, buf);
            }
            NodeKind::Label(text) => {
                Paragraph::new(text.as_str())
                    .wrap(Wrap { trim: false })
                    .render(area, buf);
            }
            NodeKind::Field(input) => {
                input.render(area, buf);
            }
            NodeKind::Button(label) => {
                let style = if focused {
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::Gray)
                };
                let block = Block::default().borders(Borders::ALL).border_style(style);
                let inner = block.inner(area);
                block.render(area, buf);
                Paragraph::new(label.as_str())
                    .style(style)
                    .alignment(Alignment::Center)
                    .render(inner, buf);
            }
            NodeKind::Tab { label, .. } => {
                let mut style = if node.selected {
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::DarkGray)
                };
                if focused {
                    style = style.add_modifier(Modifier::UNDERLINED);
                }
                Paragraph::new(Line::styled(label.clone(), style))
                    .alignment(Alignment::Center)
                    .render(area, buf);
            }
            NodeKind::Pane { text, scroll, .. } => {
                Paragraph::new(text.as_str())
                    .wrap(Wrap { trim: false })
                    .scroll((*scroll, 0))
                    .render(area, buf);
            }
            NodeKind::Item { label, .. } => {
                let marker = if node.selected { "▸ " } else { "  " };
                let mut style = Style::default();
                if node.selected {
                    style = style.fg(Color::Cyan);
                }
                if focused {
                    style = style.add_modifier(Modifier::BOLD);
                }
                Paragraph::new(Line::styled(format!("{marker}{label}"), style))
                    .render(area, buf);
            }
            NodeKind::Spacer(_) => {}
        }
    }
}
