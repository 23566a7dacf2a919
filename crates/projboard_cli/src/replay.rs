//! Scripted form submissions and drags against a mounted board.

use projboard_core::{
    Component, DataTransfer, DomEvent, EventType, HostDocument, MemoryDocument, NodeHandle,
    ProjectBoard, ProjectStatus,
};

/// Fills the form with `values` and submits it.
///
/// Returns the alert raised by a rejected submission.
pub fn submit(document: &MemoryDocument, board: &ProjectBoard, values: [&str; 3]) -> Option<String> {
    for (field, value) in board.input().fields().into_iter().zip(values) {
        document.set_input_value(field, value);
    }
    let alerts_before = document.alerts().len();
    document.dispatch(board.input().element(), &mut DomEvent::new(EventType::Submit));
    document.alerts().get(alerts_before).cloned()
}

/// Drags the first active project named `title` onto the finished list.
///
/// Returns the node that received `dragend`, or `None` when no active
/// project has that title.
pub fn finish(document: &MemoryDocument, board: &ProjectBoard, title: &str) -> Option<NodeHandle> {
    let active = board.list(ProjectStatus::Active);
    let project = active
        .assigned_projects()
        .into_iter()
        .find(|project| project.title() == title)?;
    let item = active.item_element(project.id())?;

    let mut start = DomEvent::drag(EventType::DragStart, DataTransfer::new());
    document.dispatch(item, &mut start);
    let transfer = start.data_transfer.unwrap_or_default();

    let finished = board.list(ProjectStatus::Finished);
    let target = finished.list_element();
    document.dispatch(target, &mut DomEvent::drag(EventType::DragOver, transfer.clone()));
    document.dispatch(target, &mut DomEvent::drag(EventType::Drop, transfer.clone()));

    // The drop re-rendered both lists; the dragged item now lives in the
    // finished list.
    let dragged = finished.item_element(project.id()).unwrap_or(item);
    document.dispatch(dragged, &mut DomEvent::drag(EventType::DragEnd, transfer));
    Some(dragged)
}

#[cfg(test)]
mod tests {
    use super::{finish, submit};
    use projboard_core::{
        standard_document, HostDocument, PageLayout, ProjectBoard, ProjectStatus,
        INVALID_INPUT_MESSAGE,
    };

    #[test]
    fn submit_reports_rejections() {
        let layout = PageLayout::default();
        let document = standard_document(&layout);
        let board = ProjectBoard::mount(document.clone(), &layout).expect("board mounts");

        assert_eq!(submit(&document, &board, ["Docs", "Write the docs", "2"]), None);
        assert_eq!(
            submit(&document, &board, ["", "Write the docs", "2"]).as_deref(),
            Some(INVALID_INPUT_MESSAGE)
        );
        assert_eq!(board.store().len(), 1);
    }

    #[test]
    fn finish_ends_drag_on_the_rendered_item() {
        let layout = PageLayout::default();
        let document = standard_document(&layout);
        let board = ProjectBoard::mount(document.clone(), &layout).expect("board mounts");
        submit(&document, &board, ["Build API", "Ship the endpoints", "3"]);

        let dragged = finish(&document, &board, "Build API").expect("project finished");

        let finished = board.list(ProjectStatus::Finished).list_element();
        assert!(document.is_connected(dragged));
        assert_eq!(document.parent(dragged), Some(finished));
        assert_eq!(document.attribute(dragged, "draggable").as_deref(), Some("true"));
        assert!(finish(&document, &board, "Build API").is_none());
    }
}
