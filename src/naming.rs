//! 出力ファイル名 `combo-<prefix>_<timestamp>.png` の決定.
//!
//! `prefix` は小文字 5 文字で, `zzzzz`, `zzzzy`, ..., `aaaaa` の順に, 出力先にまだ無いものを選ぶ.

use std::{
    collections::HashSet,
    fs, io,
    iter::FusedIterator,
    path::Path,
    sync::OnceLock,
};

use chrono::{DateTime, Utc};
use regex::Regex;
use tracing::warn;

pub const PREFIX_LEN: usize = 5;

/// 全ての prefix を使い切った時に使う. 既存の出力を上書きしうる.
pub const FALLBACK_PREFIX: &str = "zzzzz";

const ALPHABET_LEN: u32 = 26;
const PREFIX_COUNT: u32 = ALPHABET_LEN.pow(PREFIX_LEN as u32);

/// `Prefixes` は小文字 5 文字の文字列全てを逆辞書順に列挙する.
///
/// 内部は残り個数のカウンタだけで, 全候補をメモリに展開しない. `clone` すればそこから列挙し直せる.
#[derive(Debug, Clone)]
pub struct Prefixes {
    remaining: u32,
}

impl Prefixes {
    pub fn new() -> Self {
        Self {
            remaining: PREFIX_COUNT,
        }
    }
}

impl Iterator for Prefixes {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        Some(encode(self.remaining))
    }

    fn nth(&mut self, n: usize) -> Option<Self::Item> {
        if self.remaining as usize <= n {
            self.remaining = 0;
            return None;
        }
        self.remaining -= n as u32;
        self.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining as usize, Some(self.remaining as usize))
    }
}

impl ExactSizeIterator for Prefixes {}

impl FusedIterator for Prefixes {}

/// `value` を 26 進数として `a`..`z` の 5 桁に直す. 0 が `aaaaa`.
fn encode(mut value: u32) -> String {
    let mut letters = [b'a'; PREFIX_LEN];
    for letter in letters.iter_mut().rev() {
        *letter = b'a' + (value % ALPHABET_LEN) as u8;
        value /= ALPHABET_LEN;
    }
    letters.iter().map(|&b| b as char).collect()
}

fn combo_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^combo-([a-z]{5})_.*\.png$").expect("combo pattern is valid")
    })
}

/// ファイル名の一覧から, 既存の出力が使っている prefix を集める.
pub fn used_prefixes<I, S>(file_names: I) -> HashSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    file_names
        .into_iter()
        .filter_map(|name| {
            combo_pattern()
                .captures(name.as_ref())
                .map(|caps| caps[1].to_owned())
        })
        .collect()
}

/// `used` に無い最初の prefix を選ぶ. 使い切っていれば `FALLBACK_PREFIX`.
pub fn pick_prefix(used: &HashSet<String>) -> String {
    pick_prefix_from(Prefixes::new(), used)
}

pub(crate) fn pick_prefix_from<I>(candidates: I, used: &HashSet<String>) -> String
where
    I: IntoIterator<Item = String>,
{
    match candidates.into_iter().find(|prefix| !used.contains(prefix)) {
        Some(prefix) => prefix,
        None => {
            warn!(
                used = used.len(),
                fallback = FALLBACK_PREFIX,
                "every prefix is taken, an existing combo may be overwritten"
            );
            FALLBACK_PREFIX.to_owned()
        }
    }
}

/// 分単位の UTC 時刻. 例: `2024-03-09__07h05mUTC`.
pub fn timestamp(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d__%Hh%MmUTC").to_string()
}

pub fn output_file_name(prefix: &str, at: DateTime<Utc>) -> String {
    format!("combo-{}_{}.png", prefix, timestamp(at))
}

/// `dir` 直下のファイル名を列挙する. `dir` が無ければ空.
pub fn file_names_in(dir: &Path) -> io::Result<Vec<String>> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(vec![]),
        Err(e) => return Err(e),
    };

    let mut names = vec![];
    for entry in entries {
        if let Ok(name) = entry?.file_name().into_string() {
            names.push(name);
        }
    }
    Ok(names)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_encode() {
        assert_eq!(encode(0), "aaaaa");
        assert_eq!(encode(1), "aaaab");
        assert_eq!(encode(26), "aaaba");
        assert_eq!(encode(PREFIX_COUNT - 1), "zzzzz");
    }

    #[test]
    fn prefixes_are_reverse_lexicographic() {
        let first = Prefixes::new().take(28).collect::<Vec<_>>();
        assert_eq!(first[0], "zzzzz");
        assert_eq!(first[1], "zzzzy");
        assert_eq!(first[25], "zzzza");
        assert_eq!(first[26], "zzzyz");
        assert!(first.windows(2).all(|w| w[0] > w[1]));

        let mut prefixes = Prefixes::new();
        assert_eq!(prefixes.len(), 11_881_376);
        assert_eq!(prefixes.nth(PREFIX_COUNT as usize - 1).as_deref(), Some("aaaaa"));
        assert_eq!(prefixes.next(), None);
        assert_eq!(Prefixes::new().nth(PREFIX_COUNT as usize), None);
    }

    #[test]
    fn prefixes_can_restart() {
        let mut prefixes = Prefixes::new();
        prefixes.next();
        let restart = prefixes.clone();
        assert_eq!(prefixes.next().as_deref(), Some("zzzzy"));
        assert_eq!(restart.take(2).collect::<Vec<_>>(), vec!["zzzzy", "zzzzx"]);
    }

    #[test]
    fn test_used_prefixes() {
        let used = used_prefixes(&[
            "combo-zzzzz_2024-03-09__07h05mUTC.png",
            "combo-abcde_whatever.png",
            "combo-ABCDE_2024-03-09__07h05mUTC.png",
            "combo-abcd_2024-03-09__07h05mUTC.png",
            "combo-abcdef_2024-03-09__07h05mUTC.png",
            "combo-qwert_2024-03-09__07h05mUTC.jpg",
            "chunk_0.png",
        ]);
        let mut used = used.into_iter().collect::<Vec<_>>();
        used.sort();
        assert_eq!(used, vec!["abcde", "zzzzz"]);
    }

    #[test]
    fn picks_next_unused_prefix() {
        assert_eq!(pick_prefix(&HashSet::new()), "zzzzz");

        let used = used_prefixes(&["combo-zzzzz_2024-03-09__07h05mUTC.png"]);
        assert_eq!(pick_prefix(&used), "zzzzy");

        let used = ["zzzzz", "zzzzy", "zzzzw"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(pick_prefix(&used), "zzzzx");
    }

    #[test]
    fn falls_back_when_exhausted() {
        let candidates = vec!["zzzzz".to_owned(), "zzzzy".to_owned()];
        let used = candidates.iter().cloned().collect();
        assert_eq!(pick_prefix_from(candidates, &used), FALLBACK_PREFIX);
    }

    #[test]
    fn test_output_file_name() {
        let at = Utc.with_ymd_and_hms(2024, 3, 9, 7, 5, 42).unwrap();
        assert_eq!(timestamp(at), "2024-03-09__07h05mUTC");
        assert_eq!(
            output_file_name("zzzzy", at),
            "combo-zzzzy_2024-03-09__07h05mUTC.png"
        );
    }

    #[test]
    fn missing_directory_has_no_names() {
        let dir = tempfile::tempdir().unwrap();
        assert!(file_names_in(&dir.path().join("nowhere")).unwrap().is_empty());

        std::fs::write(dir.path().join("combo-zzzzz_x.png"), "").unwrap();
        assert_eq!(file_names_in(dir.path()).unwrap(), vec!["combo-zzzzz_x.png"]);
    }
}
