use crate::preview::tests::support::{add_link, advance, controller};
use crate::preview::{HoverState, LOADING_MARKUP};

#[test]
fn test_leave_before_delay_never_shows_panel() {
    let mut ctrl = controller();
    let link = add_link(&mut ctrl, "https://github.com/user/repo", 100.0);

    ctrl.enter(link);
    advance(&mut ctrl, 200);
    ctrl.leave(link);
    advance(&mut ctrl, 1000);

    assert!(!ctrl.surface().attached, "panel must never be appended");
    assert!(ctrl.surface().shows.is_empty());
    assert_eq!(ctrl.state(), HoverState::Idle);
    assert_eq!(ctrl.active_link(), None);
    assert_eq!(ctrl.resolver().derivations(), 0);
}

#[test]
fn test_hover_past_delay_shows_panel() {
    let mut ctrl = controller();
    let link = add_link(&mut ctrl, "https://github.com/user/repo", 100.0);

    ctrl.enter(link);
    assert_eq!(ctrl.state_name(), "pending");
    advance(&mut ctrl, 399);
    assert!(ctrl.surface().shows.is_empty());
    advance(&mut ctrl, 1);

    assert!(ctrl.is_panel_visible());
    assert_eq!(ctrl.state(), HoverState::Visible { link });
    let surface = ctrl.surface();
    assert_eq!(surface.shows.len(), 1);
    assert_eq!(surface.shows[0].1, LOADING_MARKUP);
    assert_eq!(surface.fills.len(), 1);
    assert!(surface.fills[0].contains("GitHub"));
}

#[test]
fn test_leave_visible_hides_immediately_and_releases_later() {
    let mut ctrl = controller();
    let link = add_link(&mut ctrl, "/about", 100.0);

    ctrl.enter(link);
    advance(&mut ctrl, 400);
    ctrl.leave(link);

    assert!(!ctrl.is_panel_visible());
    assert!(!ctrl.surface().visible);
    assert_eq!(ctrl.surface().hides, 1);
    // active link survives the grace period
    assert_eq!(ctrl.active_link(), Some(link));

    advance(&mut ctrl, 299);
    assert_eq!(ctrl.active_link(), Some(link));
    advance(&mut ctrl, 1);
    assert_eq!(ctrl.active_link(), None);
}

#[test]
fn test_reenter_during_grace_keeps_active_link() {
    let mut ctrl = controller();
    let link = add_link(&mut ctrl, "/about", 100.0);

    ctrl.enter(link);
    advance(&mut ctrl, 400);
    ctrl.leave(link);
    advance(&mut ctrl, 100);
    ctrl.enter(link);
    advance(&mut ctrl, 250);

    // release timer was cancelled by the re-entry
    assert_eq!(ctrl.active_link(), Some(link));
    advance(&mut ctrl, 150);
    assert!(ctrl.is_panel_visible());
}

#[test]
fn test_moving_between_links_keeps_single_reveal() {
    let mut ctrl = controller();
    let a = add_link(&mut ctrl, "https://github.com/a", 100.0);
    let b = add_link(&mut ctrl, "https://youtube.com/b", 100.0);

    ctrl.enter(a);
    advance(&mut ctrl, 300);
    ctrl.enter(b);
    advance(&mut ctrl, 300);
    // a's timer was cancelled, b's has 100ms left
    assert!(ctrl.surface().shows.is_empty());
    advance(&mut ctrl, 100);

    assert_eq!(ctrl.surface().shows.len(), 1);
    assert_eq!(ctrl.state(), HoverState::Visible { link: b });
    assert!(ctrl.surface().fills[0].contains("YouTube"));
}

#[test]
fn test_switching_visible_link_reuses_panel() {
    let mut ctrl = controller();
    let a = add_link(&mut ctrl, "https://github.com/a", 100.0);
    let b = add_link(&mut ctrl, "https://reddit.com/b", 700.0);

    ctrl.enter(a);
    advance(&mut ctrl, 400);
    ctrl.enter(b);
    assert_eq!(ctrl.surface().hides, 1);
    advance(&mut ctrl, 400);

    let shows = &ctrl.surface().shows;
    assert_eq!(shows.len(), 2);
    assert_eq!(shows[0].0.arrow.css_class(), "top");
    assert_eq!(shows[1].0.arrow.css_class(), "bottom");
    assert_eq!(ctrl.state(), HoverState::Visible { link: b });
}

#[test]
fn test_enter_same_visible_link_is_noop() {
    let mut ctrl = controller();
    let link = add_link(&mut ctrl, "/about", 100.0);

    ctrl.enter(link);
    advance(&mut ctrl, 400);
    // focus after mouseenter
    ctrl.enter(link);
    advance(&mut ctrl, 1000);

    assert_eq!(ctrl.surface().shows.len(), 1);
    assert_eq!(ctrl.surface().hides, 0);
    assert!(ctrl.is_panel_visible());
}

#[test]
fn test_leave_for_other_link_is_ignored() {
    let mut ctrl = controller();
    let a = add_link(&mut ctrl, "/a", 100.0);
    let b = add_link(&mut ctrl, "/b", 100.0);

    ctrl.enter(a);
    ctrl.leave(b);
    advance(&mut ctrl, 400);

    assert_eq!(ctrl.state(), HoverState::Visible { link: a });
}

#[test]
fn test_stale_reveal_handle_is_ignored() {
    let mut ctrl = controller();
    let link = add_link(&mut ctrl, "/a", 100.0);

    ctrl.enter(link);
    let stale = match ctrl.state() {
        HoverState::PendingDelay { timer, .. } => timer,
        other => panic!("expected pending, got {:?}", other),
    };
    ctrl.leave(link);
    ctrl.on_timer(stale, crate::preview::TimerTask::Reveal);

    assert!(ctrl.surface().shows.is_empty());
    assert_eq!(ctrl.state(), HoverState::Idle);
}

#[test]
fn test_vanished_link_returns_to_idle() {
    let mut ctrl = controller();
    let link = add_link(&mut ctrl, "/a", 100.0);
    ctrl.surface_mut().metrics.clear();

    ctrl.enter(link);
    advance(&mut ctrl, 400);

    assert_eq!(ctrl.state(), HoverState::Idle);
    assert!(ctrl.surface().shows.is_empty());
    assert_eq!(ctrl.active_link(), None);
}

#[test]
fn test_reset_cancels_everything() {
    let mut ctrl = controller();
    let a = add_link(&mut ctrl, "/a", 100.0);
    let b = add_link(&mut ctrl, "/b", 100.0);

    ctrl.enter(a);
    advance(&mut ctrl, 400);
    ctrl.leave(a);
    ctrl.enter(b);
    ctrl.reset();

    assert_eq!(ctrl.scheduler_mut().pending(), 0);
    assert_eq!(ctrl.state(), HoverState::Idle);
    assert_eq!(ctrl.active_link(), None);
    advance(&mut ctrl, 1000);
    assert_eq!(ctrl.surface().shows.len(), 1);
}
