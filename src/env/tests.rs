use std::collections::HashMap;

use super::{Env, core::Core};
use crate::ArcStr;

#[tokio::test]
async fn test_mock_env_reads_seeded_variables() {
    let env = Env::mock(HashMap::from([(
        ArcStr::from("YTRSS_TEST_MOCK"),
        ArcStr::from("8080"),
    )]));
    assert!(matches!(env, Env::Mock(_)));

    let value = env.env("YTRSS_TEST_MOCK").await.unwrap();
    assert_eq!(value.as_deref(), Some("8080"));
    assert_eq!(env.env("YTRSS_TEST_MOCK_UNSET").await.unwrap(), None);
}

#[tokio::test]
async fn test_mock_env_is_isolated_from_process() {
    unsafe { std::env::set_var("YTRSS_TEST_ISOLATED", "real") };
    let env = Env::mock(HashMap::new());
    assert_eq!(env.env("YTRSS_TEST_ISOLATED").await.unwrap(), None);
    unsafe { std::env::remove_var("YTRSS_TEST_ISOLATED") };
}

#[tokio::test]
async fn test_actual_env_reads_process_environment() {
    let env = Env::spawn();
    assert!(matches!(env, Env::Actual(_)));
    let key = "YTRSS_TEST_ACTUAL_ENV";

    unsafe { std::env::remove_var(key) };
    assert_eq!(env.env(key).await.unwrap(), None);

    unsafe { std::env::set_var(key, "test_value") };
    assert_eq!(env.env(key).await.unwrap().as_deref(), Some("test_value"));
    unsafe { std::env::remove_var(key) };
}

#[tokio::test]
async fn test_core_get_env_replies_none_when_unset() {
    let core = Core::new();
    let (tx, rx) = tokio::sync::oneshot::channel();
    core.get_env(tx, "YTRSS_TEST_CORE_NEVER_SET");
    assert_eq!(rx.await.unwrap(), Ok(None));
}

#[tokio::test]
async fn test_core_spawn() {
    let (env, handle) = Core::new().spawn();
    let key = "YTRSS_TEST_CORE_SPAWN";

    unsafe { std::env::set_var(key, "spawned") };
    assert_eq!(env.env(key).await.unwrap().as_deref(), Some("spawned"));
    unsafe { std::env::remove_var(key) };
    handle.abort();
}
