//! JSON 查询路径
//! RFC 6901 JSON Pointer，额外支持通配段 `*`：展开对象的全部成员（保持文档键序）或数组的全部元素

use std::fmt;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    Key(String),
    Wildcard,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryPath {
    raw: String,
    segments: Vec<PathSegment>,
}

impl QueryPath {
    /// 解析路径，失败时返回原因
    pub fn parse(raw: &str) -> Result<Self, String> {
        if raw.is_empty() {
            return Ok(Self {
                raw: String::new(),
                segments: Vec::new(),
            });
        }
        let Some(rest) = raw.strip_prefix('/') else {
            return Err("path must be empty or start with '/'".to_string());
        };

        let segments = rest
            .split('/')
            .map(|segment| match segment {
                "*" => Ok(PathSegment::Wildcard),
                _ => unescape(segment).map(PathSegment::Key),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            raw: raw.to_string(),
            segments,
        })
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// 选中所有命中的节点，形状不符的分支直接丢弃
    pub fn select<'a>(&self, root: &'a Value) -> Vec<&'a Value> {
        let mut current = vec![root];
        for segment in &self.segments {
            current = current
                .into_iter()
                .flat_map(|node| step(node, segment))
                .collect();
            if current.is_empty() {
                break;
            }
        }
        current
    }
}

impl fmt::Display for QueryPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

fn step<'a>(node: &'a Value, segment: &PathSegment) -> Vec<&'a Value> {
    match (segment, node) {
        (PathSegment::Wildcard, Value::Object(map)) => map.values().collect(),
        (PathSegment::Wildcard, Value::Array(items)) => items.iter().collect(),
        (PathSegment::Key(key), Value::Object(map)) => map.get(key).into_iter().collect(),
        (PathSegment::Key(key), Value::Array(items)) => key
            .parse::<usize>()
            .ok()
            .and_then(|index| items.get(index))
            .into_iter()
            .collect(),
        _ => Vec::new(),
    }
}

/// `~1` => `/`，`~0` => `~`
fn unescape(segment: &str) -> Result<String, String> {
    let mut out = String::with_capacity(segment.len());
    let mut chars = segment.chars();
    while let Some(c) = chars.next() {
        if c != '~' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('0') => out.push('~'),
            Some('1') => out.push('/'),
            other => {
                return Err(format!(
                    "invalid escape '~{}' in segment {:?}",
                    other.map(String::from).unwrap_or_default(),
                    segment
                ))
            }
        }
    }
    Ok(out)
}
