use common::PagerError;

use crate::state::{GotoOutcome, Pager};

/// Handle to a pager registered in a [`PagerGroup`]. Resolved once at setup;
/// never a runtime name search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PagerId(usize);

struct Entry {
    name: String,
    pager: Pager,
}

/// Same-request registry of pagers, used when two regions of one page must
/// stay in sync (for example a strip above and below a topic list). A linked
/// pager mirrors its target's paging values before every read and forwards
/// navigation events to it; resolution follows exactly one hop.
#[derive(Default)]
pub struct PagerGroup {
    entries: Vec<Entry>,
}

impl PagerGroup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, pager: Pager) -> PagerId {
        self.entries.push(Entry {
            name: name.into(),
            pager,
        });
        PagerId(self.entries.len() - 1)
    }

    pub fn get(&self, id: PagerId) -> Option<&Pager> {
        self.entries.get(id.0).map(|e| &e.pager)
    }

    pub fn get_mut(&mut self, id: PagerId) -> Option<&mut Pager> {
        self.entries.get_mut(id.0).map(|e| &mut e.pager)
    }

    /// Chain `from` to mirror `to`. Unknown targets and self-links fail at
    /// setup rather than at render time.
    pub fn link(&mut self, from: PagerId, to: PagerId) -> Result<(), PagerError> {
        if self.entries.get(to.0).is_none() {
            return Err(PagerError::Configuration(format!("#{}", to.0)));
        }
        if from == to {
            return Err(PagerError::Configuration(self.entries[to.0].name.clone()));
        }
        let entry = self
            .entries
            .get_mut(from.0)
            .ok_or_else(|| PagerError::Configuration(format!("#{}", from.0)))?;
        entry.pager.set_linked_to(Some(to));
        Ok(())
    }

    /// Effective state of `id` for rendering: a linked pager first copies the
    /// target's count, page size, and current page onto itself. Resolving
    /// again without an intervening navigation yields identical state. A
    /// dangling target aborts the render.
    pub fn resolve(&mut self, id: PagerId) -> Result<&Pager, PagerError> {
        let target = self.pager_checked(id)?.linked_to();
        if let Some(t) = target {
            let linked = self
                .entries
                .get(t.0)
                .ok_or_else(|| PagerError::Configuration(format!("#{}", t.0)))?
                .pager
                .clone();
            self.entries[id.0].pager.copy_settings_from(&linked);
        }
        Ok(&self.entries[id.0].pager)
    }

    /// Goto-page request addressed to `id`; a linked pager never handles it
    /// locally, the target's handler runs instead.
    pub fn goto_page(
        &mut self,
        id: PagerId,
        requested: u64,
        on_page_change: impl FnMut(),
    ) -> Result<GotoOutcome, PagerError> {
        let handler = self.handler_of(id)?;
        Ok(self.entries[handler.0].pager.goto_page(requested, on_page_change))
    }

    /// Postback event addressed to `id`, forwarded through a link like the
    /// goto form.
    pub fn raise_postback(
        &mut self,
        id: PagerId,
        argument: &str,
        on_page_change: impl FnMut(),
    ) -> Result<(), PagerError> {
        let handler = self.handler_of(id)?;
        self.entries[handler.0].pager.raise_postback(argument, on_page_change)
    }

    fn handler_of(&self, id: PagerId) -> Result<PagerId, PagerError> {
        match self.pager_checked(id)?.linked_to() {
            Some(t) => {
                if self.entries.get(t.0).is_none() {
                    return Err(PagerError::Configuration(format!("#{}", t.0)));
                }
                Ok(t)
            }
            None => Ok(id),
        }
    }

    fn pager_checked(&self, id: PagerId) -> Result<&Pager, PagerError> {
        self.entries
            .get(id.0)
            .map(|e| &e.pager)
            .ok_or_else(|| PagerError::Configuration(format!("#{}", id.0)))
    }
}
