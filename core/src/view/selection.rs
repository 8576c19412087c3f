// core/src/view/selection.rs

use crate::reconcile::DisplayCartItem;
use std::collections::HashSet;
use uuid::Uuid;

/// The ephemeral "checked for checkout" set of line ids.
///
/// Never persisted. Whenever the displayed list changes identity (after a
/// reconciliation lands or rows are removed) the set resets to "all
/// available rows selected".
#[derive(Debug, Clone, Default)]
pub struct SelectionSet {
  selected: HashSet<Uuid>,
}

impl SelectionSet {
  pub fn new() -> Self {
    Self::default()
  }

  /// Default-select every available row; unavailable rows cannot be checked
  /// out and stay unselected.
  pub fn reset_all(&mut self, rows: &[DisplayCartItem]) {
    self.selected = rows.iter().filter(|r| r.available).map(|r| r.line_id).collect();
  }

  pub fn clear(&mut self) {
    self.selected.clear();
  }

  /// Flips one row's checkbox. Ids not present in `rows` (or unavailable
  /// rows) are ignored.
  pub fn toggle(&mut self, line_id: Uuid, rows: &[DisplayCartItem]) {
    let selectable = rows.iter().any(|r| r.line_id == line_id && r.available);
    if !selectable {
      return;
    }
    if !self.selected.remove(&line_id) {
      self.selected.insert(line_id);
    }
  }

  /// The "select all" checkbox: on selects every available row, off clears.
  pub fn set_all(&mut self, rows: &[DisplayCartItem], on: bool) {
    if on {
      self.reset_all(rows);
    } else {
      self.clear();
    }
  }

  pub fn is_selected(&self, line_id: Uuid) -> bool {
    self.selected.contains(&line_id)
  }

  /// True when every available row is checked (drives the "select all"
  /// checkbox state; partial selection unchecks it).
  pub fn all_selected(&self, rows: &[DisplayCartItem]) -> bool {
    let available: Vec<_> = rows.iter().filter(|r| r.available).collect();
    !available.is_empty() && available.iter().all(|r| self.selected.contains(&r.line_id))
  }

  pub fn selected_ids(&self) -> &HashSet<Uuid> {
    &self.selected
  }

  pub fn is_empty(&self) -> bool {
    self.selected.is_empty()
  }

  pub fn len(&self) -> usize {
    self.selected.len()
  }
}
