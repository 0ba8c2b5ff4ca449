use super::*;

#[test]
fn fresh_token_is_not_cancelled() {
    assert!(!CancelToken::new().is_cancelled());
}

#[test]
fn clones_share_the_flag() {
    let token = CancelToken::new();
    let worker = token.clone();
    token.cancel();
    assert!(worker.is_cancelled());
}

#[test]
fn cancel_is_visible_across_threads() {
    let token = CancelToken::new();
    let remote = token.clone();
    std::thread::spawn(move || remote.cancel()).join().unwrap();
    assert!(token.is_cancelled());
}
