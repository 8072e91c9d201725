//! In-memory workbench
//!
//! Keeps the state an IDE window would: the active editor and the current
//! selection. Opening an editor makes it active; selections are set by the
//! host (or by tests) and read back by `ide.selection.get`.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use insight_bridge_application::{
    EditorLocation, TextSelection, Workbench, WorkbenchError, WorkbenchSelection,
};

#[derive(Debug, Default)]
struct WindowState {
    active_editor: Option<EditorLocation>,
    selection: WorkbenchSelection,
    opened: Vec<EditorLocation>,
}

#[derive(Debug)]
pub struct HeadlessWorkbench {
    attached: bool,
    state: Mutex<WindowState>,
}

impl HeadlessWorkbench {
    pub fn new() -> Self {
        Self {
            attached: true,
            state: Mutex::new(WindowState::default()),
        }
    }

    /// A workbench with no window; IDE tools report themselves unsupported
    pub fn detached() -> Self {
        Self {
            attached: false,
            ..Self::new()
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, WindowState>, WorkbenchError> {
        self.state
            .lock()
            .map_err(|_| WorkbenchError::Failed("Workbench state poisoned".to_string()))
    }

    pub fn active_editor(&self) -> Option<EditorLocation> {
        self.lock().ok().and_then(|s| s.active_editor.clone())
    }

    /// Every editor opened so far, oldest first
    pub fn opened_editors(&self) -> Vec<EditorLocation> {
        self.lock().map(|s| s.opened.clone()).unwrap_or_default()
    }

    pub fn set_selection(&self, selection: WorkbenchSelection) {
        if let Ok(mut state) = self.lock() {
            state.selection = selection;
        }
    }

    /// Select tree items, e.g. resources picked in a project explorer
    pub fn select_items<I, S>(&self, items: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.set_selection(WorkbenchSelection::Structured(
            items.into_iter().map(Into::into).collect(),
        ));
    }

    /// Select a text range in the active editor
    ///
    /// `offset` is a character offset into `content`; lines are 0-based.
    pub fn select_text(&self, content: &str, offset: usize, length: usize) {
        let file = self.active_editor().map(|e| e.file);
        let text: String = content.chars().skip(offset).take(length).collect();
        let prefix: String = content.chars().take(offset).collect();
        let start_line = prefix.matches('\n').count();
        let end_line = start_line + text.matches('\n').count();

        self.set_selection(WorkbenchSelection::Text(TextSelection {
            file,
            offset,
            length: text.chars().count(),
            start_line,
            end_line,
            text,
        }));
    }

    pub fn clear_selection(&self) {
        self.set_selection(WorkbenchSelection::None);
    }
}

impl Default for HeadlessWorkbench {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Workbench for HeadlessWorkbench {
    fn is_attached(&self) -> bool {
        self.attached
    }

    async fn open_editor(&self, location: &EditorLocation) -> Result<(), WorkbenchError> {
        if !self.attached {
            return Err(WorkbenchError::NoActiveWindow);
        }
        let mut state = self.lock()?;
        tracing::debug!(file = %location.file, line = ?location.line, "Opening editor");
        state.active_editor = Some(location.clone());
        state.opened.push(location.clone());
        Ok(())
    }

    async fn selection(&self) -> Result<WorkbenchSelection, WorkbenchError> {
        if !self.attached {
            return Err(WorkbenchError::NoActiveWindow);
        }
        Ok(self.lock()?.selection.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_open_editor_tracks_active() {
        let workbench = HeadlessWorkbench::new();
        assert!(workbench.active_editor().is_none());

        workbench
            .open_editor(&EditorLocation::new("/p/a.txt").at(Some(3), None))
            .await
            .unwrap();
        workbench
            .open_editor(&EditorLocation::new("/p/b.txt"))
            .await
            .unwrap();

        assert_eq!(workbench.active_editor().unwrap().file, "/p/b.txt");
        assert_eq!(workbench.opened_editors().len(), 2);
        assert_eq!(workbench.opened_editors()[0].line, Some(3));
    }

    #[tokio::test]
    async fn test_select_text_computes_lines() {
        let workbench = HeadlessWorkbench::new();
        workbench
            .open_editor(&EditorLocation::new("/p/a.txt"))
            .await
            .unwrap();
        workbench.select_text("one\ntwo\nthree\n", 4, 8);

        let WorkbenchSelection::Text(selection) = workbench.selection().await.unwrap() else {
            panic!("expected text selection");
        };
        assert_eq!(selection.file.as_deref(), Some("/p/a.txt"));
        assert_eq!(selection.text, "two\nthre");
        assert_eq!(selection.start_line, 1);
        assert_eq!(selection.end_line, 2);
        assert_eq!(selection.length, 8);
    }

    #[tokio::test]
    async fn test_detached_has_no_window() {
        let workbench = HeadlessWorkbench::detached();
        assert!(!workbench.is_attached());
        assert!(matches!(
            workbench.selection().await,
            Err(WorkbenchError::NoActiveWindow)
        ));
        assert!(
            workbench
                .open_editor(&EditorLocation::new("/a"))
                .await
                .is_err()
        );
    }

    #[tokio::test]
    async fn test_structured_selection() {
        let workbench = HeadlessWorkbench::new();
        workbench.select_items(["/p", "/p/src"]);
        assert_eq!(
            workbench.selection().await.unwrap(),
            WorkbenchSelection::Structured(vec!["/p".to_string(), "/p/src".to_string()])
        );
        workbench.clear_selection();
        assert_eq!(workbench.selection().await.unwrap(), WorkbenchSelection::None);
    }
}
