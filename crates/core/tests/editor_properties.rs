//! End-to-end behavior of the editor through its public API.

use layout_editor_core::doc_model::{Element, ElementId, ElementPatch, Rect, ViewKind};
use layout_editor_core::{
    Editor, EditorConfig, EditorError, GestureState, PageSize, PointerTarget, ResizeHandle,
    ScreenPoint, Shortcut, ViewMode,
};
use std::time::{Duration, Instant};

const PAGE: PageSize = PageSize { width: 600.0, height: 800.0 };

fn editor() -> Editor {
    let mut editor = Editor::new(EditorConfig::default());
    editor.set_surface(PAGE, 1.0);
    editor
}

fn add_box(editor: &mut Editor, id: &str, rect: Rect) -> ElementId {
    editor.add_element(ViewKind::Original, Element::text_box(id, 1, rect, id)).unwrap()
}

fn rect_of(editor: &Editor, id: &str) -> Rect {
    editor.store().get(&ElementId::from(id)).unwrap().rect()
}

fn pt(x: f32, y: f32) -> ScreenPoint {
    ScreenPoint::new(x, y)
}

/// Drag from `from` to `to` in `steps` frames, releasing at the end
fn drag(
    editor: &mut Editor,
    target: PointerTarget,
    from: ScreenPoint,
    to: ScreenPoint,
    steps: u32,
) {
    editor.pointer_down(from, target);
    for step in 1..=steps {
        let t = step as f32 / steps as f32;
        editor.pointer_move(pt(from.x + (to.x - from.x) * t, from.y + (to.y - from.y) * t));
        editor.animation_frame();
    }
    editor.pointer_up();
}

fn select_rect(editor: &mut Editor, from: ScreenPoint, to: ScreenPoint) {
    editor.set_selection_mode(true);
    drag(editor, PointerTarget::Canvas, from, to, 3);
    editor.set_selection_mode(false);
}

fn assert_inside_page(rect: Rect) {
    assert!(rect.x >= 0.0 && rect.y >= 0.0, "{rect:?} starts outside the page");
    assert!(rect.right() <= PAGE.width + 1e-3, "{rect:?} crosses the right edge");
    assert!(rect.bottom() <= PAGE.height + 1e-3, "{rect:?} crosses the bottom edge");
}

#[test]
fn moves_and_resizes_stay_inside_the_page() {
    let mut editor = editor();
    add_box(&mut editor, "a", Rect::new(500.0, 700.0, 80.0, 60.0));
    add_box(&mut editor, "b", Rect::new(20.0, 20.0, 80.0, 60.0));

    drag(&mut editor, PointerTarget::Element("a".into()), pt(510.0, 710.0), pt(900.0, 1200.0), 10);
    assert_eq!(rect_of(&editor, "a"), Rect::new(520.0, 740.0, 80.0, 60.0));

    drag(&mut editor, PointerTarget::Element("b".into()), pt(30.0, 30.0), pt(-200.0, -200.0), 10);
    assert_eq!(rect_of(&editor, "b"), Rect::new(0.0, 0.0, 80.0, 60.0));

    drag(
        &mut editor,
        PointerTarget::Handle("b".into(), ResizeHandle::BottomRight),
        pt(80.0, 60.0),
        pt(2000.0, 2000.0),
        4,
    );
    assert_eq!(rect_of(&editor, "b"), Rect::new(0.0, 0.0, 600.0, 800.0));

    let left_edge = PointerTarget::Handle("b".into(), ResizeHandle::Left);
    drag(&mut editor, left_edge, pt(0.0, 400.0), pt(900.0, 400.0), 4);
    let b = rect_of(&editor, "b");
    assert_eq!(b.width, 20.0);
    assert_inside_page(b);

    for id in ["a", "b"] {
        assert_inside_page(rect_of(&editor, id));
    }
}

#[test]
fn updates_are_clamped_to_the_page() {
    let mut editor = editor();
    let id = add_box(&mut editor, "a", Rect::new(10.0, 10.0, 100.0, 50.0));

    editor.update_element(&id, ElementPatch::position(-50.0, 790.0)).unwrap();
    assert_eq!(rect_of(&editor, "a"), Rect::new(0.0, 750.0, 100.0, 50.0));

    let wide = ElementPatch { width: Some(2000.0), ..Default::default() };
    editor.update_element(&id, wide).unwrap();
    assert_eq!(rect_of(&editor, "a"), Rect::new(0.0, 750.0, 600.0, 50.0));

    let squeezed = ElementPatch { width: Some(5.0), height: Some(900.0), ..Default::default() };
    editor.update_element(&id, squeezed).unwrap();
    assert_eq!(rect_of(&editor, "a"), Rect::new(0.0, 0.0, 20.0, 800.0));
    assert_inside_page(rect_of(&editor, "a"));

    let off_page = ElementPatch { page: Some(0), ..Default::default() };
    assert!(matches!(editor.update_element(&id, off_page), Err(EditorError::InvalidPage(0))));
    assert_eq!(editor.store().get(&id).unwrap().page, 1);

    assert!(editor.undo());
    assert_eq!(rect_of(&editor, "a"), Rect::new(0.0, 750.0, 600.0, 50.0));
    assert!(editor.undo());
    assert!(editor.undo());
    assert_eq!(rect_of(&editor, "a"), Rect::new(10.0, 10.0, 100.0, 50.0));
}

#[test]
fn rectangle_selects_only_intersecting_elements() {
    let mut editor = editor();
    add_box(&mut editor, "a", Rect::new(10.0, 10.0, 20.0, 20.0));
    add_box(&mut editor, "b", Rect::new(100.0, 100.0, 20.0, 20.0));

    editor.set_selection_mode(true);
    editor.pointer_down(pt(0.0, 0.0), PointerTarget::Canvas);
    assert_eq!(editor.gesture_state(), GestureState::Selecting);
    editor.pointer_move(pt(50.0, 50.0));
    editor.animation_frame();

    // Preview highlights without committing
    assert_eq!(editor.rubber_band_preview(), &[ElementId::from("a")]);
    assert!(editor.selection().is_none());

    editor.pointer_up();
    let selection = editor.selection().unwrap();
    let ids: Vec<_> = selection.ids().map(ElementId::as_str).collect();
    assert_eq!(ids, vec!["a"]);
    assert_eq!(editor.selection_bounds(), Some(Rect::new(10.0, 10.0, 20.0, 20.0)));
}

#[test]
fn tiny_rectangle_is_a_click() {
    let mut editor = editor();
    add_box(&mut editor, "a", Rect::new(10.0, 10.0, 20.0, 20.0));
    select_rect(&mut editor, pt(0.0, 0.0), pt(50.0, 50.0));
    assert!(editor.selection().is_some());

    select_rect(&mut editor, pt(12.0, 12.0), pt(15.0, 14.0));
    assert!(editor.selection().is_none());
    assert!(editor.rubber_band_preview().is_empty());
}

#[test]
fn undo_and_redo_round_trip_create_and_move() {
    let mut editor = editor();
    let before = editor.snapshot();

    add_box(&mut editor, "e", Rect::new(40.0, 40.0, 50.0, 50.0));
    drag(&mut editor, PointerTarget::Element("e".into()), pt(50.0, 50.0), pt(55.0, 55.0), 2);
    let moved = editor.snapshot();
    assert_eq!(rect_of(&editor, "e"), Rect::new(45.0, 45.0, 50.0, 50.0));

    assert!(editor.undo());
    assert!(editor.undo());
    assert_eq!(editor.snapshot(), before);
    assert!(!editor.undo());

    assert!(editor.redo());
    assert!(editor.redo());
    assert_eq!(editor.snapshot(), moved);
    assert!(!editor.redo());
}

#[test]
fn group_move_preserves_relative_offsets() {
    let mut editor = editor();
    add_box(&mut editor, "a", Rect::new(100.0, 100.0, 40.0, 40.0));
    add_box(&mut editor, "b", Rect::new(120.0, 100.0, 40.0, 40.0));
    select_rect(&mut editor, pt(90.0, 90.0), pt(200.0, 200.0));
    assert!(editor.selection().unwrap().is_multi());

    editor.pointer_down(pt(110.0, 110.0), PointerTarget::Element("a".into()));
    editor.pointer_move(pt(140.0, 100.0));
    editor.animation_frame();

    // Only the active element is written; the other one is displaced visually
    assert_eq!(rect_of(&editor, "a"), Rect::new(130.0, 90.0, 40.0, 40.0));
    assert_eq!(rect_of(&editor, "b"), Rect::new(120.0, 100.0, 40.0, 40.0));
    let offset = editor.visual_offset(&"b".into()).unwrap();
    assert_eq!((offset.offset_x, offset.offset_y), (30.0, -10.0));
    assert_eq!(editor.painted_rect(&"b".into()), Some(Rect::new(150.0, 90.0, 40.0, 40.0)));

    editor.pointer_up();
    let a = rect_of(&editor, "a");
    let b = rect_of(&editor, "b");
    assert_eq!(b.x - a.x, 20.0);
    assert_eq!(b.y, a.y);
    assert!(editor.visual_offset(&"b".into()).is_none());
    assert_eq!(editor.selection_bounds(), Some(Rect::new(130.0, 90.0, 60.0, 40.0)));
}

#[test]
fn group_move_is_one_undo_step() {
    let mut editor = editor();
    add_box(&mut editor, "a", Rect::new(100.0, 100.0, 40.0, 40.0));
    add_box(&mut editor, "b", Rect::new(200.0, 100.0, 40.0, 40.0));
    add_box(&mut editor, "c", Rect::new(300.0, 100.0, 40.0, 40.0));
    select_rect(&mut editor, pt(90.0, 90.0), pt(400.0, 200.0));
    let levels = editor.history().undo_levels();

    drag(&mut editor, PointerTarget::Element("b".into()), pt(210.0, 110.0), pt(250.0, 150.0), 20);
    assert_eq!(editor.history().undo_levels(), levels + 1);
    assert_eq!(editor.history().undo_description(), Some("Move 3 elements"));

    editor.undo();
    assert_eq!(rect_of(&editor, "a").x, 100.0);
    assert_eq!(rect_of(&editor, "b").x, 200.0);
    assert_eq!(rect_of(&editor, "c").x, 300.0);
}

#[test]
fn group_members_clamp_independently() {
    let mut editor = editor();
    add_box(&mut editor, "a", Rect::new(100.0, 100.0, 40.0, 40.0));
    add_box(&mut editor, "b", Rect::new(540.0, 100.0, 40.0, 40.0));
    select_rect(&mut editor, pt(90.0, 90.0), pt(590.0, 150.0));

    drag(&mut editor, PointerTarget::Element("a".into()), pt(110.0, 110.0), pt(160.0, 110.0), 5);

    assert_eq!(rect_of(&editor, "a").x, 150.0);
    assert_eq!(rect_of(&editor, "b").x, 560.0);
}

#[test]
fn escape_abandons_group_move() {
    let mut editor = editor();
    add_box(&mut editor, "a", Rect::new(100.0, 100.0, 40.0, 40.0));
    add_box(&mut editor, "b", Rect::new(200.0, 100.0, 40.0, 40.0));
    select_rect(&mut editor, pt(90.0, 90.0), pt(300.0, 200.0));
    let levels = editor.history().undo_levels();

    editor.pointer_down(pt(110.0, 110.0), PointerTarget::Element("a".into()));
    editor.pointer_move(pt(170.0, 170.0));
    editor.animation_frame();
    editor.handle_shortcut(Shortcut::Cancel, Instant::now());

    assert_eq!(editor.gesture_state(), GestureState::Idle);
    assert_eq!(rect_of(&editor, "a"), Rect::new(100.0, 100.0, 40.0, 40.0));
    assert_eq!(rect_of(&editor, "b"), Rect::new(200.0, 100.0, 40.0, 40.0));
    assert!(editor.visual_offset(&"b".into()).is_none());
    assert!(editor.selection().is_none());
    assert_eq!(editor.history().undo_levels(), levels);
}

#[test]
fn move_to_front_twice_matches_once() {
    let mut editor = editor();
    for id in ["a", "b", "c"] {
        add_box(&mut editor, id, Rect::new(0.0, 0.0, 30.0, 30.0));
    }

    assert!(editor.move_to_front(&"a".into()).unwrap());
    let once = editor.layers().order(ViewKind::Original).to_vec();
    let levels = editor.history().undo_levels();

    assert!(!editor.move_to_front(&"a".into()).unwrap());
    assert_eq!(editor.layers().order(ViewKind::Original), once.as_slice());
    assert_eq!(editor.history().undo_levels(), levels);
}

#[test]
fn fifty_frame_drag_is_one_undo_entry() {
    let mut editor = editor();
    add_box(&mut editor, "a", Rect::new(10.0, 10.0, 50.0, 50.0));
    let levels = editor.history().undo_levels();

    editor.pointer_down(pt(20.0, 20.0), PointerTarget::Element("a".into()));
    for step in 1..=50 {
        editor.pointer_move(pt(20.0 + step as f32 * 2.0, 20.0 + step as f32));
        assert!(editor.animation_frame());
    }
    editor.pointer_up();

    assert_eq!(editor.history().undo_levels(), levels + 1);
    assert_eq!(rect_of(&editor, "a"), Rect::new(110.0, 60.0, 50.0, 50.0));
}

#[test]
fn duplicate_ids_are_rejected() {
    let mut editor = editor();

    let first = add_box(&mut editor, "dup", Rect::new(0.0, 0.0, 30.0, 30.0));
    let image = Element::image("dup", 1, Rect::new(50.0, 50.0, 30.0, 30.0), "x.png");
    let second = editor.add_element(ViewKind::Translated, image).unwrap();

    assert_eq!(first, second);
    assert_eq!(editor.store().len(), 1);
    assert_eq!(editor.store().view_of(&first), Some(ViewKind::Original));
    assert_eq!(editor.history().undo_levels(), 1);
}

#[test]
fn undo_mid_gesture_never_leaves_half_applied_drag() {
    let mut editor = editor();
    add_box(&mut editor, "a", Rect::new(10.0, 10.0, 50.0, 50.0));

    editor.pointer_down(pt(20.0, 20.0), PointerTarget::Element("a".into()));
    editor.pointer_move(pt(120.0, 20.0));
    editor.animation_frame();
    assert!(editor.undo());

    assert_eq!(editor.gesture_state(), GestureState::Idle);
    assert_eq!(rect_of(&editor, "a"), Rect::new(10.0, 10.0, 50.0, 50.0));
    assert!(editor.redo());
    assert_eq!(rect_of(&editor, "a"), Rect::new(110.0, 10.0, 50.0, 50.0));
}

#[test]
fn split_view_routes_pointer_to_panes() {
    let mut editor = editor();
    editor.set_surface(PAGE, 0.5);
    editor.set_view_mode(ViewMode::Split);
    let text = Element::text_box("t", 1, Rect::new(20.0, 20.0, 60.0, 40.0), "T");
    editor.add_element(ViewKind::Translated, text).unwrap();
    let on_text = || PointerTarget::Element("t".into());

    // Left pane is 300px wide, the gap spans 300..320px
    assert_eq!(editor.pointer_down(pt(310.0, 20.0), on_text()), GestureState::Idle);

    // The translated element is not reachable from the left pane
    assert_eq!(editor.pointer_down(pt(20.0, 20.0), on_text()), GestureState::Idle);

    // Right pane origin is 320px; element's left edge at 320 + 20 * 0.5
    assert_eq!(editor.pointer_down(pt(335.0, 15.0), on_text()), GestureState::Dragging);
    editor.pointer_move(pt(345.0, 25.0));
    editor.pointer_up();

    assert_eq!(rect_of(&editor, "t"), Rect::new(40.0, 40.0, 60.0, 40.0));
}

#[test]
fn elements_on_other_pages_are_out_of_reach() {
    let mut editor = editor();
    let other_page = Element::text_box("p2", 2, Rect::new(10.0, 10.0, 50.0, 50.0), "x");
    editor.add_element(ViewKind::Original, other_page).unwrap();
    add_box(&mut editor, "p1", Rect::new(10.0, 10.0, 50.0, 50.0));

    let state = editor.pointer_down(pt(20.0, 20.0), PointerTarget::Element("p2".into()));
    assert_eq!(state, GestureState::Idle);

    select_rect(&mut editor, pt(0.0, 0.0), pt(100.0, 100.0));
    let ids: Vec<_> = editor.selection().unwrap().ids().map(ElementId::as_str).collect();
    assert_eq!(ids, vec!["p1"]);

    editor.set_current_page(2).unwrap();
    assert!(editor.selection().is_none());
    let painted: Vec<_> =
        editor.sorted_elements(ViewKind::Original).into_iter().map(|e| e.id.as_str()).collect();
    assert_eq!(painted, vec!["p2"]);
}

#[test]
fn delete_selection_is_one_step_and_restores_layers() {
    let mut editor = editor();
    for (i, id) in ["a", "b", "c"].iter().enumerate() {
        add_box(&mut editor, id, Rect::new(i as f32 * 100.0, 0.0, 50.0, 50.0));
    }
    select_rect(&mut editor, pt(0.0, 0.0), pt(160.0, 60.0));
    let order = editor.layers().order(ViewKind::Original).to_vec();

    assert!(editor.handle_shortcut(Shortcut::DeleteSelection, Instant::now()));
    assert_eq!(editor.store().len(), 1);

    editor.undo();
    assert_eq!(editor.store().len(), 3);
    assert_eq!(editor.layers().order(ViewKind::Original), order.as_slice());
}

#[test]
fn held_undo_key_steps_once_per_interval() {
    let mut editor = editor();
    for id in ["a", "b", "c", "d"] {
        add_box(&mut editor, id, Rect::new(0.0, 0.0, 30.0, 30.0));
    }
    let t0 = Instant::now();

    // Key repeat every 30ms for 600ms
    let fired = (0..20u64)
        .filter(|&i| editor.handle_shortcut(Shortcut::Undo, t0 + Duration::from_millis(i * 30)))
        .count();

    assert_eq!(fired, 2);
    assert_eq!(editor.store().len(), 2);
}

#[test]
fn loading_a_snapshot_resets_history() {
    let mut editor = editor();
    add_box(&mut editor, "a", Rect::new(0.0, 0.0, 30.0, 30.0));
    let snapshot = editor.snapshot();
    add_box(&mut editor, "b", Rect::new(0.0, 0.0, 30.0, 30.0));

    let report = editor.load_snapshot(snapshot).unwrap();

    assert_eq!(report.elements, 1);
    assert!(!editor.can_undo());
    assert!(!editor.can_redo());
    assert!(!editor.store().contains(&"b".into()));
}
