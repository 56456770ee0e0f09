//! 平面字符串属性通道
//!
//! 消费运行时只持久化每个消费者的不透明字符串属性，不持久化结构化对象。
//! 这里用一对读写 trait 抽象该通道，使配置的编码/解码可以独立测试。

use std::collections::{BTreeMap, HashMap};

/// 属性写入端：设置一个命名字符串属性
pub trait PropertySink {
    fn set_property(&mut self, key: &str, value: &str);
}

/// 属性读取端：按键读取，以及枚举全部键（用于扫描主题权重命名空间）
pub trait PropertySource {
    fn get_property(&self, key: &str) -> Option<&str>;

    fn property_keys(&self) -> Vec<&str>;
}

impl PropertySink for HashMap<String, String> {
    fn set_property(&mut self, key: &str, value: &str) {
        self.insert(key.to_string(), value.to_string());
    }
}

impl PropertySource for HashMap<String, String> {
    fn get_property(&self, key: &str) -> Option<&str> {
        self.get(key).map(String::as_str)
    }

    fn property_keys(&self) -> Vec<&str> {
        self.keys().map(String::as_str).collect()
    }
}

impl PropertySink for BTreeMap<String, String> {
    fn set_property(&mut self, key: &str, value: &str) {
        self.insert(key.to_string(), value.to_string());
    }
}

impl PropertySource for BTreeMap<String, String> {
    fn get_property(&self, key: &str) -> Option<&str> {
        self.get(key).map(String::as_str)
    }

    fn property_keys(&self) -> Vec<&str> {
        self.keys().map(String::as_str).collect()
    }
}
