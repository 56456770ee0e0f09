//! 配置往返与校验测试
//!
//! 覆盖属性通道的编码/解码往返、缺省值与解析失败回退、
//! 主题权重的名称约定推断，以及惰性校验的全部拒绝路径。

use flare_weighted_consumer::{
    DistributionStrategy, ErrorCode, WeightedConsumerConfig, WT_TOPIC_CONF_PREFIX,
};
use std::collections::HashMap;

fn populated(conf: &WeightedConsumerConfig) -> HashMap<String, String> {
    let mut props = HashMap::new();
    conf.populate(&mut props).expect("valid config populates");
    props
}

#[test]
fn defaults_match_documented_values() {
    let conf = WeightedConsumerConfig::new();
    assert_eq!(conf.distribution_strategy(), DistributionStrategy::Linear);
    assert_eq!(conf.min_bound(), 100);
    assert_eq!(conf.max_bound(), 1000);
    assert_eq!(conf.max_weight_allowed(), 100);
    assert!(!conf.is_throttle_receive_queue());
    assert_eq!(conf.queue_resume_threshold(), 0);
    assert!(conf.topic_weights().is_empty());
}

#[test]
fn round_trip_reproduces_configuration() {
    let mut conf = WeightedConsumerConfig::new();
    conf.set_distribution_strategy(DistributionStrategy::Exponential);
    conf.set_min_bound(200);
    conf.set_max_bound(5000);
    conf.set_max_weight_allowed(50);
    conf.set_throttle_receive_queue(true);
    conf.set_queue_resume_threshold(150);
    conf.add_topic("orders", Some(5)).expect("valid topic");
    conf.add_topic("payments", Some(30)).expect("valid topic");
    conf.add_topic("audit", None).expect("valid topic");

    let props = populated(&conf);
    let restored = WeightedConsumerConfig::load_from_properties(&props).expect("valid properties");

    assert_eq!(restored, conf);
}

#[test]
fn populate_writes_namespaced_keys() {
    let mut conf = WeightedConsumerConfig::new();
    conf.add_topic("orders", Some(5)).expect("valid topic");

    let props = populated(&conf);
    assert_eq!(props.get("WT_DIST_STRATEGY").map(String::as_str), Some("LINEAR"));
    assert_eq!(props.get("WT_MIN_BOUND").map(String::as_str), Some("100"));
    assert_eq!(props.get("WT_MAX_BOUND").map(String::as_str), Some("1000"));
    assert_eq!(props.get("WT_THROTTLE_RQ").map(String::as_str), Some("false"));
    assert_eq!(props.get("WT_RESUME_THRESHOLD").map(String::as_str), Some("0"));
    assert_eq!(props.get("WT_MAX_WT_ALLOWED").map(String::as_str), Some("100"));
    assert_eq!(props.get("WTP_orders").map(String::as_str), Some("5"));
}

#[test]
fn load_from_empty_source_yields_defaults() {
    let props: HashMap<String, String> = HashMap::new();
    let conf = WeightedConsumerConfig::load_from_properties(&props).expect("defaults are valid");
    assert_eq!(conf, WeightedConsumerConfig::new());
}

#[test]
fn malformed_numeric_property_falls_back_to_default() {
    let mut props: HashMap<String, String> = HashMap::new();
    props.insert("WT_MIN_BOUND".to_string(), "not-a-number".to_string());
    props.insert("WT_RESUME_THRESHOLD".to_string(), "".to_string());

    let conf = WeightedConsumerConfig::load_from_properties(&props).expect("parse failure is not an error");
    assert_eq!(conf.min_bound(), 100);
    assert_eq!(conf.queue_resume_threshold(), 0);
}

#[test]
fn unknown_strategy_is_a_configuration_error() {
    let mut props: HashMap<String, String> = HashMap::new();
    props.insert("WT_DIST_STRATEGY".to_string(), "QUADRATIC".to_string());

    let err = WeightedConsumerConfig::load_from_properties(&props).expect_err("unknown strategy");
    assert_eq!(err.code(), Some(ErrorCode::InvalidDistributionStrategy));
}

#[test]
fn malformed_topic_weight_retriggers_name_inference() {
    let mut props: HashMap<String, String> = HashMap::new();
    props.insert(
        format!("{}orders-weight-7", WT_TOPIC_CONF_PREFIX),
        "junk".to_string(),
    );
    props.insert(format!("{}audit", WT_TOPIC_CONF_PREFIX), String::new());

    let conf = WeightedConsumerConfig::load_from_properties(&props).expect("fallback, not error");
    assert_eq!(conf.topic_weights().get("orders-weight-7"), Some(&7));
    assert_eq!(conf.topic_weights().get("audit"), Some(&1));
}

#[test]
fn add_topic_infers_weight_from_name_convention() {
    let mut conf = WeightedConsumerConfig::new();
    conf.add_topic("orders-weight-7", None).expect("valid topic");
    conf.add_topic("orders", None).expect("valid topic");
    conf.add_topic("payments-weight-3", Some(9)).expect("valid topic");

    assert_eq!(conf.topic_weights().get("orders-weight-7"), Some(&7));
    assert_eq!(conf.topic_weights().get("orders"), Some(&1));
    // 显式权重优先于名称约定
    assert_eq!(conf.topic_weights().get("payments-weight-3"), Some(&9));
}

#[test]
fn topics_deduplicate_by_canonical_name() {
    let mut conf = WeightedConsumerConfig::new();
    conf.add_topic("orders-partition-0", Some(3)).expect("valid topic");
    conf.add_topic("orders-partition-1", Some(5)).expect("valid topic");

    assert_eq!(conf.topic_weights().len(), 1);
    assert_eq!(conf.topic_weights().get("orders"), Some(&5));
}

#[test]
fn validation_rejects_inconsistent_configuration() {
    let mut conf = WeightedConsumerConfig::new();
    conf.set_min_bound(50);
    let err = conf.validate().expect_err("min bound below 100");
    assert_eq!(err.code(), Some(ErrorCode::InvalidBound));

    let mut conf = WeightedConsumerConfig::new();
    conf.set_max_bound(99);
    let err = conf.validate().expect_err("max bound below min bound");
    assert_eq!(err.code(), Some(ErrorCode::InvalidBound));

    let mut conf = WeightedConsumerConfig::new();
    conf.set_queue_resume_threshold(101);
    let err = conf.validate().expect_err("resume threshold above min bound");
    assert_eq!(err.code(), Some(ErrorCode::InvalidResumeThreshold));

    let mut conf = WeightedConsumerConfig::new();
    conf.set_max_weight_allowed(0);
    let err = conf.validate().expect_err("max weight allowed below 1");
    assert_eq!(err.code(), Some(ErrorCode::InvalidWeight));

    let mut conf = WeightedConsumerConfig::new();
    conf.add_topic("orders", Some(200)).expect("added before validation");
    let err = conf.validate().expect_err("weight above max weight allowed");
    assert_eq!(err.code(), Some(ErrorCode::InvalidWeight));
}

#[test]
fn populate_and_load_run_validation() {
    let mut conf = WeightedConsumerConfig::new();
    conf.set_queue_resume_threshold(9999);

    let mut props: HashMap<String, String> = HashMap::new();
    let err = conf.populate(&mut props).expect_err("populate validates first");
    assert!(err.is_configuration());

    let mut props: HashMap<String, String> = HashMap::new();
    props.insert("WT_RESUME_THRESHOLD".to_string(), "9999".to_string());
    let err = WeightedConsumerConfig::load_from_properties(&props).expect_err("load validates");
    assert_eq!(err.code(), Some(ErrorCode::InvalidResumeThreshold));
}

#[test]
fn validation_is_lazy_during_building() {
    // 构建过程中允许暂时不一致，只有使用时才校验
    let mut conf = WeightedConsumerConfig::new();
    conf.set_min_bound(5000);
    conf.set_max_bound(200);
    conf.set_max_bound(8000);
    conf.validate().expect("final state is consistent");
}

#[test]
fn load_from_toml_file() {
    let path = std::env::temp_dir().join(format!(
        "flare-weighted-consumer-test-{}.toml",
        std::process::id()
    ));
    std::fs::write(
        &path,
        r#"
distribution_strategy = "EXPONENTIAL"
min_bound = 200
max_bound = 2000
max_weight_allowed = 10

[topic_weights]
orders = 5
"#,
    )
    .expect("write temp config");

    let conf = WeightedConsumerConfig::load_from_file(&path).expect("valid file");
    std::fs::remove_file(&path).ok();

    assert_eq!(conf.distribution_strategy(), DistributionStrategy::Exponential);
    assert_eq!(conf.min_bound(), 200);
    assert_eq!(conf.max_bound(), 2000);
    assert_eq!(conf.max_weight_allowed(), 10);
    assert_eq!(conf.topic_weights().get("orders"), Some(&5));
}
