//! JSONC 预处理
//! 去掉 `//`、`/* */` 注释与对象/数组末尾的多余逗号，得到可交给 serde_json 的标准 JSON。
//! 字符串字面量（含转义）原样保留；注释中的换行保留，行号与原文一致。

use serde_json::Value;

use crate::error::DeprefResult;

/// 解析 JSON / JSONC 文档
pub fn parse_jsonc(input: &str) -> DeprefResult<Value> {
    Ok(serde_json::from_str(&strip_jsonc(input))?)
}

/// 把 JSONC 文本转换为标准 JSON 文本
pub fn strip_jsonc(input: &str) -> String {
    let without_comments = strip_comments(input);
    strip_trailing_commas(&without_comments)
}

fn strip_comments(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    let mut in_string = false;

    while let Some(c) = chars.next() {
        if in_string {
            out.push(c);
            match c {
                '\\' => {
                    if let Some(escaped) = chars.next() {
                        out.push(escaped);
                    }
                }
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        let next = chars.peek().copied();
        match (c, next) {
            ('"', _) => {
                in_string = true;
                out.push(c);
            }
            ('/', Some('/')) => {
                for skipped in chars.by_ref() {
                    if skipped == '\n' {
                        out.push('\n');
                        break;
                    }
                }
            }
            ('/', Some('*')) => {
                chars.next();
                out.push_str("  ");
                let mut prev = '\0';
                for skipped in chars.by_ref() {
                    out.push(if skipped == '\n' { '\n' } else { ' ' });
                    if prev == '*' && skipped == '/' {
                        break;
                    }
                    prev = skipped;
                }
            }
            _ => out.push(c),
        }
    }

    out
}

/// 仅在注释已去除后调用
fn strip_trailing_commas(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut in_string = false;
    let mut escaped = false;
    // 尚未确定去留的逗号在 out 中的位置
    let mut pending_comma: Option<usize> = None;

    for c in input.chars() {
        if in_string {
            out.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }

        match c {
            ',' => {
                pending_comma = Some(out.len());
                out.push(c);
            }
            '}' | ']' => {
                if let Some(index) = pending_comma.take() {
                    out.replace_range(index..index + 1, " ");
                }
                out.push(c);
            }
            c if c.is_whitespace() => out.push(c),
            _ => {
                pending_comma = None;
                if c == '"' {
                    in_string = true;
                }
                out.push(c);
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_deno_jsonc() {
        let input = r#"{
  // 依赖映射
  "imports": {
    "chalk": "npm:chalk@5", /* 终端颜色 */
    "std/": "https://deno.land/std@0.204.0/",
  },
  /* 多行
     块注释 */
  "tasks": { "dev": "deno run main.ts" },
}"#;
        let value = parse_jsonc(input).unwrap();
        assert_eq!(
            value,
            json!({
                "imports": {
                    "chalk": "npm:chalk@5",
                    "std/": "https://deno.land/std@0.204.0/"
                },
                "tasks": { "dev": "deno run main.ts" }
            })
        );
    }

    #[test]
    fn test_strings_untouched() {
        let input = r#"{ "url": "https://x.nest.land/a@1/mod.ts", "note": "a // b /* c */ ,]", "q": "\"//\"" }"#;
        let value = parse_jsonc(input).unwrap();
        assert_eq!(value["url"], "https://x.nest.land/a@1/mod.ts");
        assert_eq!(value["note"], "a // b /* c */ ,]");
        assert_eq!(value["q"], "\"//\"");
    }

    #[test]
    fn test_plain_json_unchanged() {
        let input = "{\n  \"imports\": { \"a\": \"npm:a@1\" },\n  \"list\": [1, 2]\n}";
        assert_eq!(strip_jsonc(input), input);
    }

    #[test]
    fn test_line_numbers_preserved() {
        let input = "{\n  /* a\n  b */\n  \"x\": 1 // c\n}";
        let stripped = strip_jsonc(input);
        assert_eq!(stripped.lines().count(), input.lines().count());
    }

    #[test]
    fn test_malformed_still_errors() {
        assert!(parse_jsonc("{ \"imports\": ").is_err());
        assert!(parse_jsonc("// only a comment").is_err());
    }
}
