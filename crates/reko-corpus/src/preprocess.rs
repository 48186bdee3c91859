//! Text cleaning, punctuation normalization and segmentation

use jieba_rs::Jieba;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::OnceLock;

static HTML_TAG_RE: OnceLock<Regex> = OnceLock::new();
static URL_RE: OnceLock<Regex> = OnceLock::new();
static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
static DISALLOWED_RE: OnceLock<Regex> = OnceLock::new();
static WHITESPACE_RE: OnceLock<Regex> = OnceLock::new();
static SENTENCE_END_RE: OnceLock<Regex> = OnceLock::new();

/// Punctuation split off into standalone tokens during segmentation
const DETACHED_MARKS: &[char] = &['，', '。', '！', '？', '；', '：'];

/// Replacement rules applied by [`normalize_text`], in order
const PUNCTUATION_RULES: &[(&str, &str)] = &[
    (r"[，,]+", "，"),
    (r"[。.]+", "。"),
    (r"[！!]+", "！"),
    (r"[？?]+", "？"),
];

static PUNCTUATION_RES: OnceLock<Vec<(Regex, &'static str)>> = OnceLock::new();

/// Function words and generic terms dropped by [`Step::RemoveStopWords`]
const STOP_WORDS: &[&str] = &[
    "的", "了", "在", "是", "我", "有", "和", "就", "不", "人", "都", "一", "一个", "上",
    "也", "很", "到", "说", "要", "去", "你", "会", "着", "没有", "看", "好", "自己", "这",
    "那", "他", "她", "它", "我们", "你们", "他们", "这个", "那个", "这些", "那些", "什么",
    "怎么", "为什么", "因为", "所以", "但是", "然后", "如果", "虽然", "可以", "应该", "能够",
    "已经", "正在", "将要", "可能", "一定", "必须", "需要", "想要", "希望", "觉得", "认为",
    "知道", "了解", "理解", "记得", "忘记", "开始", "结束", "完成", "进行", "继续", "停止",
    "改变", "增加", "减少", "提高", "降低", "重要", "必要", "主要", "基本", "简单", "复杂",
    "容易", "困难", "存在", "出现", "发生", "变成", "成为", "作为", "对于", "关于", "根据",
    "按照", "通过", "使用", "利用", "应用", "执行", "操作", "处理", "管理", "方法", "问题",
    "情况", "状态", "条件", "原因", "结果", "过程", "阶段", "步骤", "部分", "整体", "系统",
    "功能", "相关", "不同", "相同", "不需要", "不知道", "不可以", "不应该",
];

static STOP_WORD_SET: OnceLock<HashSet<&'static str>> = OnceLock::new();

fn jieba() -> &'static Jieba {
    static INSTANCE: OnceLock<Jieba> = OnceLock::new();
    INSTANCE.get_or_init(Jieba::new)
}

// same ideograph range `clean_text` keeps
fn is_cjk_ideograph(c: char) -> bool {
    ('\u{4e00}'..='\u{9fa5}').contains(&c)
}

fn regex(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(pattern).unwrap())
}

/// Strip markup, links, addresses and characters outside the supported set
pub fn clean_text(text: &str) -> String {
    let text = regex(&HTML_TAG_RE, r"<[^>]+>").replace_all(text, "");
    let text = regex(&URL_RE, r"https?://\S+").replace_all(&text, "");
    let text = regex(&EMAIL_RE, r"\S+@\S+").replace_all(&text, "");
    let text = regex(
        &DISALLOWED_RE,
        r"[^\x{4e00}-\x{9fa5}a-zA-Z0-9\s，。！？；：“”‘’（）《》【】、.,!?]",
    )
    .replace_all(&text, "");
    regex(&WHITESPACE_RE, r"\s+")
        .replace_all(&text, " ")
        .trim()
        .to_string()
}

/// Collapse runs of ASCII and full-width punctuation into one full-width mark
pub fn normalize_text(text: &str, to_lower: bool) -> String {
    let rules = PUNCTUATION_RES.get_or_init(|| {
        PUNCTUATION_RULES
            .iter()
            .map(|(pattern, replacement)| (Regex::new(pattern).unwrap(), *replacement))
            .collect()
    });

    let mut text = if to_lower {
        text.to_lowercase()
    } else {
        text.to_string()
    };
    for (re, replacement) in rules {
        text = re.replace_all(&text, *replacement).into_owned();
    }
    text
}

/// Split into word tokens.
///
/// Whitespace separates chunks and sentence punctuation becomes its own
/// token. Runs containing Chinese ideographs are cut into words by jieba.
pub fn segment_text(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    for chunk in text.split_whitespace() {
        let mut word = String::new();
        for c in chunk.chars() {
            if DETACHED_MARKS.contains(&c) {
                push_word(&mut tokens, &std::mem::take(&mut word));
                tokens.push(c.to_string());
            } else {
                word.push(c);
            }
        }
        push_word(&mut tokens, &word);
    }
    tokens
}

fn push_word(tokens: &mut Vec<String>, word: &str) {
    if word.is_empty() {
        return;
    }
    if !word.chars().any(is_cjk_ideograph) {
        tokens.push(word.to_string());
        return;
    }
    for piece in jieba().cut(word, true) {
        let piece = piece.trim();
        if !piece.is_empty() {
            tokens.push(piece.to_string());
        }
    }
}

pub fn is_stop_word(word: &str) -> bool {
    STOP_WORD_SET
        .get_or_init(|| STOP_WORDS.iter().copied().collect())
        .contains(word)
}

/// Drop stop words and single-character tokens
pub fn remove_stop_words(words: Vec<String>) -> Vec<String> {
    let before = words.len();
    let kept: Vec<String> = words
        .into_iter()
        .filter(|w| w.chars().count() > 1 && !is_stop_word(w))
        .collect();
    tracing::trace!(removed = before - kept.len(), "stop words removed");
    kept
}

/// One stage of [`preprocess_with`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Clean,
    Normalize,
    Segment,
    RemoveStopWords,
}

/// Steps used for corpus documents and queries; function words stay so
/// generation can produce them
pub const CORPUS_STEPS: &[Step] = &[Step::Clean, Step::Normalize, Step::Segment];

/// Steps used for statistics and vocabulary building
pub const ANALYSIS_STEPS: &[Step] = &[
    Step::Clean,
    Step::Normalize,
    Step::Segment,
    Step::RemoveStopWords,
];

/// Run `steps` in order.
///
/// Stop-word removal only applies after segmentation. Text that was never
/// segmented is segmented at the end.
pub fn preprocess_with(text: &str, steps: &[Step]) -> Vec<String> {
    let mut text = text.to_string();
    let mut words: Option<Vec<String>> = None;

    for step in steps {
        match step {
            Step::Clean => text = clean_text(&text),
            Step::Normalize => text = normalize_text(&text, true),
            Step::Segment => words = Some(segment_text(&text)),
            Step::RemoveStopWords => words = words.map(remove_stop_words),
        }
    }

    words.unwrap_or_else(|| segment_text(&text))
}

/// Clean, normalize and segment a raw document
pub fn preprocess(text: &str) -> Vec<String> {
    preprocess_with(text, CORPUS_STEPS)
}

/// Tokenize user input exactly like corpus documents and rejoin with single
/// spaces, so queries meet the same n-gram keys
pub fn normalize_query(text: &str) -> String {
    preprocess(text).join(" ")
}

/// Descriptive statistics for one raw text
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextStatistics {
    pub char_count: usize,
    pub word_count: usize,
    pub sentence_count: usize,
    pub unique_words: usize,
    pub avg_word_length: f64,
    pub vocabulary_richness: f64,
}

/// Word counts are taken after stop-word removal
pub fn text_statistics(text: &str) -> TextStatistics {
    let words = preprocess_with(text, ANALYSIS_STEPS);
    let word_count = words.len();
    let unique_words = words.iter().collect::<HashSet<_>>().len();
    let sentence_count = regex(&SENTENCE_END_RE, r"[。！？.!?]")
        .split(text)
        .filter(|s| !s.trim().is_empty())
        .count();

    let (avg_word_length, vocabulary_richness) = if word_count == 0 {
        (0.0, 0.0)
    } else {
        let chars: usize = words.iter().map(|w| w.chars().count()).sum();
        (
            chars as f64 / word_count as f64,
            unique_words as f64 / word_count as f64,
        )
    };

    TextStatistics {
        char_count: text.chars().count(),
        word_count,
        sentence_count,
        unique_words,
        avg_word_length,
        vocabulary_richness,
    }
}
