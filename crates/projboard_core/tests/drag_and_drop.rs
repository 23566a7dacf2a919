use projboard_core::{
    standard_document, Component, DataTransfer, DomEvent, DropEffect, EventType, HostDocument,
    MemoryDocument, NodeHandle, PageLayout, ProjectBoard, ProjectId, ProjectStatus, DRAG_FORMAT,
    DROPPABLE_CLASS,
};
use std::rc::Rc;

fn mounted() -> (Rc<MemoryDocument>, ProjectBoard) {
    let layout = PageLayout::default();
    let doc = standard_document(&layout);
    let board = ProjectBoard::mount(doc.clone(), &layout).expect("board mounts");
    (doc, board)
}

fn add_through_form(doc: &MemoryDocument, board: &ProjectBoard, values: [&str; 3]) -> ProjectId {
    for (field, value) in board.input().fields().into_iter().zip(values) {
        doc.set_input_value(field, value);
    }
    doc.dispatch(board.input().element(), &mut DomEvent::new(EventType::Submit));
    board
        .store()
        .projects()
        .last()
        .expect("project added")
        .id()
}

fn drag_start(doc: &MemoryDocument, item: NodeHandle) -> DataTransfer {
    let mut event = DomEvent::drag(EventType::DragStart, DataTransfer::new());
    doc.dispatch(item, &mut event);
    event.data_transfer.expect("transfer survives dispatch")
}

fn rendered_titles(doc: &MemoryDocument, board: &ProjectBoard, status: ProjectStatus) -> Vec<String> {
    doc.children(board.list(status).list_element())
        .into_iter()
        .map(|item| {
            let heading = doc
                .query_selector(item, &"h2".into())
                .expect("item heading");
            doc.text_content(heading)
        })
        .collect()
}

#[test]
fn lists_render_headings_and_ids() {
    let (doc, board) = mounted();

    for (status, heading) in [
        (ProjectStatus::Active, "ACTIVE PROJECTS"),
        (ProjectStatus::Finished, "FINISHED PROJECTS"),
    ] {
        let list = board.list(status);
        let section = doc
            .element_by_id(&format!("{status}-projects"))
            .expect("list section");
        assert_eq!(section, list.element());
        assert_eq!(
            doc.element_by_id(&format!("{status}-projects-list")),
            Some(list.list_element())
        );
        let h2 = doc.query_selector(section, &"h2".into()).expect("heading");
        assert_eq!(doc.text_content(h2), heading);
    }

    let app = doc.element_by_id("app").expect("app host");
    assert_eq!(
        doc.children(app),
        vec![
            board.input().element(),
            board.list(ProjectStatus::Active).element(),
            board.list(ProjectStatus::Finished).element(),
        ]
    );
}

#[test]
fn item_renders_project_fields_and_is_draggable() {
    let (doc, board) = mounted();
    let id = add_through_form(&doc, &board, ["Solo", "Just me here", "1"]);

    let item = board
        .list(ProjectStatus::Active)
        .item_element(id)
        .expect("item rendered");
    assert_eq!(doc.element_by_id(&id.to_string()), Some(item));
    assert_eq!(doc.attribute(item, "draggable").as_deref(), Some("true"));
    assert_eq!(
        doc.outer_html(item),
        format!(
            "<li id=\"{id}\" draggable=\"true\"><h2>Solo</h2><h3>1 person assigned</h3><p>Just me here</p></li>"
        )
    );
}

#[test]
fn drag_start_sets_project_id_payload_and_move_effect() {
    let (doc, board) = mounted();
    let id = add_through_form(&doc, &board, ["Build API", "Design and build", "3"]);
    let item = board
        .list(ProjectStatus::Active)
        .item_element(id)
        .expect("item rendered");

    let transfer = drag_start(&doc, item);

    assert_eq!(transfer.types(), vec![DRAG_FORMAT]);
    assert_eq!(transfer.get_data(DRAG_FORMAT), Some(id.to_string().as_str()));
    assert_eq!(transfer.effect_allowed, Some(DropEffect::Move));

    doc.dispatch(item, &mut DomEvent::drag(EventType::DragEnd, transfer));
    assert_eq!(
        board.store().project(id).expect("project").status(),
        ProjectStatus::Active
    );
}

#[test]
fn drag_over_marks_droppable_only_for_project_payloads() {
    let (doc, board) = mounted();
    let finished = board.list(ProjectStatus::Finished);

    let mut foreign = DataTransfer::new();
    foreign.set_data("text/uri-list", "https://example.com");
    let mut event = DomEvent::drag(EventType::DragOver, foreign);
    doc.dispatch(finished.element(), &mut event);
    assert!(!event.is_default_prevented());
    assert!(!doc.has_class(finished.list_element(), DROPPABLE_CLASS));

    let mut project = DataTransfer::new();
    project.set_data(DRAG_FORMAT, "anything");
    let mut event = DomEvent::drag(EventType::DragOver, project);
    doc.dispatch(finished.list_element(), &mut event);
    assert!(event.is_default_prevented());
    assert!(doc.has_class(finished.list_element(), DROPPABLE_CLASS));

    doc.dispatch(
        finished.element(),
        &mut DomEvent::drag(EventType::DragLeave, DataTransfer::new()),
    );
    assert!(!doc.has_class(finished.list_element(), DROPPABLE_CLASS));
}

#[test]
fn dropping_onto_finished_moves_project_between_partitions() {
    let (doc, board) = mounted();
    let id = add_through_form(&doc, &board, ["Build API", "Design and build", "3"]);
    let active = board.list(ProjectStatus::Active);
    let finished = board.list(ProjectStatus::Finished);

    assert_eq!(rendered_titles(&doc, &board, ProjectStatus::Active), vec!["Build API"]);
    assert!(rendered_titles(&doc, &board, ProjectStatus::Finished).is_empty());

    let item = active.item_element(id).expect("item rendered");
    let transfer = drag_start(&doc, item);
    let mut over = DomEvent::drag(EventType::DragOver, transfer.clone());
    doc.dispatch(finished.list_element(), &mut over);
    let mut drop = DomEvent::drag(EventType::Drop, transfer);
    doc.dispatch(finished.list_element(), &mut drop);

    assert!(drop.is_default_prevented());
    assert!(!doc.has_class(finished.list_element(), DROPPABLE_CLASS));
    assert!(rendered_titles(&doc, &board, ProjectStatus::Active).is_empty());
    assert_eq!(
        rendered_titles(&doc, &board, ProjectStatus::Finished),
        vec!["Build API"]
    );
    assert!(active.assigned_projects().is_empty());
    assert_eq!(finished.assigned_projects().len(), 1);
    assert_eq!(
        board.store().project(id).expect("project").status(),
        ProjectStatus::Finished
    );
}

#[test]
fn dropping_onto_own_partition_changes_nothing() {
    let (doc, board) = mounted();
    let id = add_through_form(&doc, &board, ["Build API", "Design and build", "3"]);
    let active = board.list(ProjectStatus::Active);
    let item = active.item_element(id).expect("item rendered");

    let transfer = drag_start(&doc, item);
    doc.dispatch(item, &mut DomEvent::drag(EventType::Drop, transfer));

    assert_eq!(active.item_element(id), Some(item));
    assert_eq!(
        board.store().project(id).expect("project").status(),
        ProjectStatus::Active
    );
}

#[test]
fn malformed_payload_is_ignored() {
    let (doc, board) = mounted();
    add_through_form(&doc, &board, ["Build API", "Design and build", "3"]);
    let finished = board.list(ProjectStatus::Finished);

    let mut transfer = DataTransfer::new();
    transfer.set_data(DRAG_FORMAT, "not-a-project-id");
    doc.dispatch(finished.element(), &mut DomEvent::drag(EventType::Drop, transfer));
    doc.dispatch(finished.element(), &mut DomEvent::new(EventType::Drop));

    assert!(finished.assigned_projects().is_empty());
    assert_eq!(board.list(ProjectStatus::Active).assigned_projects().len(), 1);
}

#[test]
fn partitions_keep_store_order_across_moves() {
    let (doc, board) = mounted();
    let first = add_through_form(&doc, &board, ["First", "First one", "1"]);
    let second = add_through_form(&doc, &board, ["Second", "Second one", "2"]);
    let third = add_through_form(&doc, &board, ["Third", "Third one", "3"]);

    board.store().move_project(third, ProjectStatus::Finished);
    board.store().move_project(first, ProjectStatus::Finished);

    assert_eq!(rendered_titles(&doc, &board, ProjectStatus::Active), vec!["Second"]);
    assert_eq!(
        rendered_titles(&doc, &board, ProjectStatus::Finished),
        vec!["First", "Third"]
    );
    assert!(board.list(ProjectStatus::Active).item_element(second).is_some());
}

#[test]
fn repeated_moves_keep_the_page_size_constant() {
    let (doc, board) = mounted();
    let id = add_through_form(&doc, &board, ["Churn", "Moved back and forth", "2"]);
    board.store().move_project(id, ProjectStatus::Finished);
    board.store().move_project(id, ProjectStatus::Active);
    let settled = doc.node_count();

    for _ in 0..100 {
        assert!(board.store().move_project(id, ProjectStatus::Finished));
        assert!(board.store().move_project(id, ProjectStatus::Active));
    }

    assert_eq!(doc.node_count(), settled);
    assert_eq!(rendered_titles(&doc, &board, ProjectStatus::Active), vec!["Churn"]);
    assert!(rendered_titles(&doc, &board, ProjectStatus::Finished).is_empty());
}
