// SPDX-FileCopyrightText: 2026 Stories Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Timed viewer behavior on a paused tokio clock.

use std::sync::Arc;
use std::time::Duration;

use stories_config::{BoundaryPolicy, PlaybackConfig};
use stories_core::UserId;
use stories_test_utils::{user, users, DelegateCall, MockStoryState, RecordingDelegate};
use stories_viewer::{Phase, StoryViewer, Transition};
use tokio::time::sleep;

/// Ten 100 ms ticks per story.
fn playback(at_boundary: BoundaryPolicy) -> PlaybackConfig {
    PlaybackConfig {
        story_duration_secs: 1.0,
        tick_interval_ms: 100,
        at_boundary,
    }
}

fn open(
    start: u64,
    order: impl IntoIterator<Item = u64>,
    at_boundary: BoundaryPolicy,
) -> (StoryViewer, Arc<MockStoryState>, Arc<RecordingDelegate>) {
    let state = Arc::new(MockStoryState::new());
    let delegate = Arc::new(RecordingDelegate::with_order(users(order)));
    let viewer = StoryViewer::open(
        user(start),
        state.clone(),
        delegate.clone(),
        &playback(at_boundary),
    );
    (viewer, state, delegate)
}

#[tokio::test(start_paused = true)]
async fn stories_auto_advance_and_are_marked_seen() {
    let (viewer, state, _) = open(3, [3], BoundaryPolicy::Stay);
    assert_eq!(state.seen_indexes(UserId(3)), vec![0]);

    sleep(Duration::from_millis(1050)).await;
    assert_eq!(viewer.snapshot().await.story_index, 1);

    sleep(Duration::from_millis(1000)).await;
    let snapshot = viewer.snapshot().await;
    assert_eq!(snapshot.story_index, 2);
    assert!((snapshot.progress - 0.0).abs() < 1e-9);
    assert_eq!(state.seen_indexes(UserId(3)), vec![0, 1, 2]);
}

#[tokio::test(start_paused = true)]
async fn tick_driven_user_change_restarts_on_first_story() {
    let (viewer, state, delegate) = open(3, [3, 4], BoundaryPolicy::Stay);

    sleep(Duration::from_millis(3050)).await;
    let snapshot = viewer.snapshot().await;
    assert_eq!(snapshot.user.id, UserId(4));
    assert_eq!(snapshot.story_index, 0);
    assert_eq!(snapshot.phase, Phase::Playing);
    assert_eq!(state.seen_indexes(UserId(4)), vec![0]);
    assert_eq!(delegate.calls(), vec![DelegateCall::NextUser(UserId(3))]);

    sleep(Duration::from_millis(100)).await;
    assert!((viewer.snapshot().await.progress - 0.1).abs() < 1e-9);
    assert!(viewer.is_ticking());
}

#[tokio::test(start_paused = true)]
async fn last_story_of_last_user_stays_by_default() {
    let (viewer, _, _) = open(3, [3], BoundaryPolicy::Stay);

    sleep(Duration::from_millis(3050)).await;
    let snapshot = viewer.snapshot().await;
    assert_eq!(snapshot.story_index, 2);
    assert_eq!(snapshot.phase, Phase::Playing);
    assert!(viewer.is_ticking());
}

#[tokio::test(start_paused = true)]
async fn dismiss_policy_closes_viewer_from_the_timer() {
    let (viewer, _, delegate) = open(3, [3], BoundaryPolicy::Dismiss);

    sleep(Duration::from_millis(3050)).await;
    assert_eq!(viewer.snapshot().await.phase, Phase::Dismissed);
    assert_eq!(
        delegate.calls().last(),
        Some(&DelegateCall::Dismissed(UserId(3)))
    );
    assert!(!viewer.is_ticking());
}

#[tokio::test(start_paused = true)]
async fn holding_pauses_playback() {
    let (mut viewer, _, _) = open(4, [4], BoundaryPolicy::Stay);
    sleep(Duration::from_millis(250)).await;

    viewer.press().await;
    sleep(Duration::from_secs(30)).await;
    let snapshot = viewer.snapshot().await;
    assert!(snapshot.paused);
    assert_eq!(snapshot.story_index, 0);
    assert!((snapshot.progress - 0.2).abs() < 1e-9);

    viewer.release().await;
    sleep(Duration::from_millis(1000)).await;
    assert_eq!(viewer.snapshot().await.story_index, 1);
}

#[tokio::test(start_paused = true)]
async fn manual_user_change_resets_playback() {
    let (mut viewer, state, _) = open(3, [3, 4, 5], BoundaryPolicy::Stay);
    sleep(Duration::from_millis(550)).await;
    viewer.press().await;

    let transition = viewer.change_user(user(5)).await;
    assert_eq!(transition, Transition::UserChanged { user_id: UserId(5) });
    let snapshot = viewer.snapshot().await;
    assert_eq!(snapshot.progress, 0.0);
    assert!(!snapshot.paused);
    assert_eq!(state.seen_indexes(UserId(5)), vec![0]);

    sleep(Duration::from_millis(250)).await;
    // One timer only: a leftover task would tick twice as fast.
    assert!((viewer.snapshot().await.progress - 0.2).abs() < 1e-9);
}

#[tokio::test(start_paused = true)]
async fn taps_walk_across_users() {
    let (mut viewer, _, _) = open(3, [3, 4], BoundaryPolicy::Stay);

    assert_eq!(viewer.tap_previous().await, Transition::NoNeighbor);
    assert_eq!(viewer.tap_next().await, Transition::Story { index: 1 });
    assert_eq!(viewer.tap_next().await, Transition::Story { index: 2 });
    assert_eq!(
        viewer.tap_next().await,
        Transition::UserChanged { user_id: UserId(4) }
    );
    assert_eq!(
        viewer.tap_previous().await,
        Transition::UserChanged { user_id: UserId(3) }
    );
    assert_eq!(viewer.snapshot().await.story_index, 0);
}

#[tokio::test(start_paused = true)]
async fn no_tick_reaches_a_dismissed_viewer() {
    let (mut viewer, state, delegate) = open(4, [4, 5], BoundaryPolicy::Stay);
    sleep(Duration::from_millis(1050)).await;

    assert_eq!(viewer.dismiss().await, Transition::Dismissed);
    assert!(!viewer.is_ticking());
    let calls = state.calls().len();
    let snapshot = viewer.snapshot().await;

    sleep(Duration::from_secs(60)).await;
    assert_eq!(state.calls().len(), calls);
    assert_eq!(viewer.snapshot().await, snapshot);
    assert_eq!(viewer.tap_next().await, Transition::None);
    assert_eq!(viewer.dismiss().await, Transition::None);
    assert_eq!(
        delegate
            .calls()
            .iter()
            .filter(|c| matches!(c, DelegateCall::Dismissed(_)))
            .count(),
        1
    );
}

#[tokio::test(start_paused = true)]
async fn likes_and_messages() {
    let (mut viewer, _, _) = open(3, [3], BoundaryPolicy::Stay);

    assert_eq!(viewer.double_tap().await, Some(true));
    assert_eq!(viewer.double_tap().await, Some(true));
    assert_eq!(viewer.toggle_like().await, Some(false));
    assert!(!viewer.snapshot().await.liked);
    assert!(viewer.send_message("hi").await.is_err());
}

#[tokio::test(start_paused = true)]
async fn tapped_story_gets_a_full_first_tick() {
    let (mut viewer, _, _) = open(3, [3], BoundaryPolicy::Stay);
    sleep(Duration::from_millis(550)).await;

    assert_eq!(viewer.tap_next().await, Transition::Story { index: 1 });
    sleep(Duration::from_millis(90)).await;
    assert_eq!(viewer.snapshot().await.progress, 0.0);

    sleep(Duration::from_millis(20)).await;
    assert!((viewer.snapshot().await.progress - 0.1).abs() < 1e-9);

    assert_eq!(viewer.tap_previous().await, Transition::Story { index: 0 });
    sleep(Duration::from_millis(90)).await;
    assert_eq!(viewer.snapshot().await.progress, 0.0);
    assert!(viewer.is_ticking());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn gestures_persist_on_a_multi_thread_runtime() {
    let (mut viewer, state, _) = open(3, [3, 4], BoundaryPolicy::Stay);

    assert_eq!(viewer.tap_next().await, Transition::Story { index: 1 });
    assert_eq!(viewer.double_tap().await, Some(true));
    assert_eq!(
        viewer.change_user(user(4)).await,
        Transition::UserChanged { user_id: UserId(4) }
    );
    assert_eq!(state.seen_indexes(UserId(3)), vec![0, 1]);
    assert_eq!(state.seen_indexes(UserId(4)), vec![0]);
    assert_eq!(viewer.dismiss().await, Transition::Dismissed);
}
