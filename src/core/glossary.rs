//! In-memory glossary of finance terms.
//!
//! Entries live only for the lifetime of the process. Edits and deletions go
//! through a [`Prompter`] so that the caller decides how confirmation is
//! collected.

use super::error::GlossaryError;
use super::quiz::TermDefinition;
use std::cmp::Ordering;
use std::fmt::Display;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Currency,
    Tax,
    Investment,
    Economy,
    Banking,
    Other,
}

impl Category {
    /// Categories that can be assigned from the edit prompt.
    pub const EDITABLE: [Category; 6] = [
        Category::Currency,
        Category::Tax,
        Category::Investment,
        Category::Economy,
        Category::Banking,
        Category::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Currency => "通貨",
            Category::Tax => "税金",
            Category::Investment => "投資",
            Category::Economy => "経済",
            Category::Banking => "銀行",
            Category::Other => "その他",
        }
    }

    pub fn editable_labels() -> String {
        Self::EDITABLE
            .iter()
            .map(|c| c.label())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = GlossaryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let category = match s.to_lowercase().as_str() {
            "通貨" | "currency" => Category::Currency,
            "税金" | "tax" => Category::Tax,
            "投資" | "investment" => Category::Investment,
            "経済" | "economy" => Category::Economy,
            "銀行" | "banking" | "bank" => Category::Banking,
            "その他" | "other" => Category::Other,
            _ => return Err(GlossaryError::InvalidCategory(Self::editable_labels())),
        };
        Ok(category)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlossaryEntry {
    pub id: u32,
    pub term: String,
    pub reading: String,
    pub meaning: String,
    pub category: Category,
}

impl GlossaryEntry {
    fn matches(&self, needle: &str) -> bool {
        self.term.to_lowercase().contains(needle)
            || self.reading.to_lowercase().contains(needle)
            || self.meaning.to_lowercase().contains(needle)
    }
}

impl TermDefinition for GlossaryEntry {
    fn term(&self) -> &str {
        &self.term
    }

    fn definition(&self) -> &str {
        &self.meaning
    }
}

/// Fields for a new entry, as typed by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEntry {
    pub term: String,
    pub reading: String,
    pub meaning: String,
    pub category: Category,
}

/// Source of interactive answers for edit and delete.
pub trait Prompter {
    /// Asks for a new value for `label`, showing `current`. `None` cancels.
    fn prompt(&mut self, label: &str, current: &str) -> Option<String>;

    fn confirm(&mut self, message: &str) -> bool;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    NotFound,
    Cancelled,
    Updated(GlossaryEntry),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    NotFound,
    Cancelled,
    Deleted(GlossaryEntry),
}

/// Sort key approximating Japanese dictionary order: katakana is folded to
/// hiragana and ASCII letters are case-folded.
fn collation_key(term: &str) -> Vec<char> {
    term.chars()
        .map(|c| match c {
            'ァ'..='ヶ' => char::from_u32(c as u32 - 0x60).unwrap_or(c),
            _ => c.to_ascii_lowercase(),
        })
        .collect()
}

pub(crate) fn collate(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.cmp(b))
}

#[derive(Debug, Clone)]
pub struct Glossary {
    entries: Vec<GlossaryEntry>,
    next_id: u32,
}

impl Glossary {
    pub fn new(entries: Vec<GlossaryEntry>) -> Self {
        let next_id = entries.iter().map(|e| e.id).max().unwrap_or(0) + 1;
        Self { entries, next_id }
    }

    pub fn entries(&self) -> &[GlossaryEntry] {
        &self.entries
    }

    pub fn get(&self, id: u32) -> Option<&GlossaryEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Case-insensitive substring search over term, reading and meaning. A
    /// blank query returns every entry.
    pub fn search(&self, query: &str) -> Vec<&GlossaryEntry> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return self.entries.iter().collect();
        }
        self.entries.iter().filter(|e| e.matches(&needle)).collect()
    }

    fn has_term(&self, term: &str, except: Option<u32>) -> bool {
        let term = term.to_lowercase();
        self.entries
            .iter()
            .any(|e| Some(e.id) != except && e.term.to_lowercase() == term)
    }

    fn sort(&mut self) {
        self.entries.sort_by(|a, b| collate(&a.term, &b.term));
    }

    pub fn add(&mut self, new: NewEntry) -> Result<&GlossaryEntry, GlossaryError> {
        let term = new.term.trim();
        let reading = new.reading.trim();
        let meaning = new.meaning.trim();
        if term.is_empty() || reading.is_empty() || meaning.is_empty() {
            return Err(GlossaryError::MissingField);
        }
        if self.has_term(term, None) {
            return Err(GlossaryError::DuplicateTerm(term.to_string()));
        }

        let id = self.next_id;
        self.next_id += 1;
        self.entries.push(GlossaryEntry {
            id,
            term: term.to_string(),
            reading: reading.to_string(),
            meaning: meaning.to_string(),
            category: new.category,
        });
        self.sort();

        // Just pushed, so the lookup cannot miss.
        self.get(id).ok_or(GlossaryError::MissingField)
    }

    /// Prompts for each field in turn. Cancelling any prompt leaves the entry
    /// untouched; a blank answer keeps the current value.
    pub fn edit(
        &mut self,
        id: u32,
        prompter: &mut dyn Prompter,
    ) -> Result<EditOutcome, GlossaryError> {
        let Some(current) = self.get(id).cloned() else {
            return Ok(EditOutcome::NotFound);
        };

        let mut answers = Vec::with_capacity(4);
        for (label, value) in [
            ("Term", current.term.as_str()),
            ("Reading", current.reading.as_str()),
            ("Meaning", current.meaning.as_str()),
        ] {
            match prompter.prompt(label, value) {
                Some(answer) => answers.push(answer),
                None => return Ok(EditOutcome::Cancelled),
            }
        }
        let category_label = format!("Category ({})", Category::editable_labels());
        let Some(category_answer) = prompter.prompt(&category_label, current.category.label())
        else {
            return Ok(EditOutcome::Cancelled);
        };

        let category = if category_answer.trim().is_empty() {
            current.category
        } else {
            category_answer.parse::<Category>()?
        };

        let keep_or = |answer: &str, current: &str| {
            let answer = answer.trim();
            if answer.is_empty() {
                current.to_string()
            } else {
                answer.to_string()
            }
        };
        let term = keep_or(&answers[0], &current.term);
        if self.has_term(&term, Some(id)) {
            return Err(GlossaryError::DuplicateTerm(term));
        }

        let updated = GlossaryEntry {
            id,
            term,
            reading: keep_or(&answers[1], &current.reading),
            meaning: keep_or(&answers[2], &current.meaning),
            category,
        };
        if let Some(entry) = self.entries.iter_mut().find(|e| e.id == id) {
            *entry = updated.clone();
        }
        self.sort();
        Ok(EditOutcome::Updated(updated))
    }

    pub fn delete(&mut self, id: u32, prompter: &mut dyn Prompter) -> DeleteOutcome {
        let Some(entry) = self.get(id).cloned() else {
            return DeleteOutcome::NotFound;
        };
        let message = format!("Delete '{}'? This cannot be undone.", entry.term);
        if !prompter.confirm(&message) {
            return DeleteOutcome::Cancelled;
        }
        self.entries.retain(|e| e.id != id);
        DeleteOutcome::Deleted(entry)
    }

    /// Finance glossary shipped with the app.
    pub fn finance() -> Self {
        let seed: [(&str, &str, &str, Category); 14] = [
            (
                "GDP",
                "ジーディーピー",
                "国内総生産（Gross Domestic Product）。一定期間内に国内で生産されたすべての最終財・サービスの市場価値の合計。国の経済規模を測る重要な指標です。",
                Category::Economy,
            ),
            (
                "インフレーション",
                "インフレーション",
                "物価が継続的に上昇する現象。お金の価値が下がり、同じ商品を買うのにより多くのお金が必要になります。",
                Category::Economy,
            ),
            (
                "デフレーション",
                "デフレーション",
                "物価が継続的に下落する現象。お金の価値は上がりますが、企業の売上減少や雇用悪化を招くことがあります。",
                Category::Economy,
            ),
            (
                "為替レート",
                "かわせレート",
                "異なる通貨を交換する際の比率。「1ドル=150円」のように表され、貿易や投資に大きな影響を与えます。",
                Category::Currency,
            ),
            (
                "累進課税",
                "るいしんかぜい",
                "所得が多いほど高い税率が適用される税制。日本の所得税が採用しており、所得の再分配機能を持ちます。",
                Category::Tax,
            ),
            (
                "消費税",
                "しょうひぜい",
                "商品やサービスの購入時に課される税金。日本では標準税率10%、軽減税率8%です。",
                Category::Tax,
            ),
            (
                "複利",
                "ふくり",
                "元本に利息を加えた金額に対して、さらに利息が計算される仕組み。長期投資で大きな効果を発揮します。",
                Category::Investment,
            ),
            (
                "分散投資",
                "ぶんさんとうし",
                "投資先を複数に分けてリスクを軽減する投資手法。「卵を一つのかごに盛るな」とも言われます。",
                Category::Investment,
            ),
            (
                "中央銀行",
                "ちゅうおうぎんこう",
                "国の金融政策を担う銀行。日本では日本銀行がこれに当たり、通貨発行や金利政策を担います。",
                Category::Banking,
            ),
            (
                "金利",
                "きんり",
                "お金を借りる際に支払う利息、または預金に対して受け取る利息の割合。",
                Category::Banking,
            ),
            (
                "インボイス制度",
                "インボイスせいど",
                "消費税の仕入税額控除を受けるために適格請求書を発行・保存する制度。2023年10月に開始されました。",
                Category::Tax,
            ),
            (
                "欠損金",
                "けっそんきん",
                "法人税法上の赤字。費用や損失が収益を上回った場合に発生し、一定の要件下で翌年度以降の所得と相殺できます。",
                Category::Tax,
            ),
            (
                "繰越控除制度",
                "くりこしこうじょせいど",
                "欠損金を翌年度以降に繰り越して将来の所得から控除できる制度。法人は最大10年間、個人事業主は最大3年間です。",
                Category::Tax,
            ),
            (
                "基礎控除",
                "きそこうじょ",
                "すべての納税者に一律で認められる所得控除。所得税の基礎控除額は原則48万円です。",
                Category::Tax,
            ),
        ];
        Self::from_seed(&seed)
    }

    fn from_seed(seed: &[(&str, &str, &str, Category)]) -> Self {
        let entries = seed
            .iter()
            .zip(1..)
            .map(|((term, reading, meaning, category), id)| GlossaryEntry {
                id,
                term: term.to_string(),
                reading: reading.to_string(),
                meaning: meaning.to_string(),
                category: *category,
            })
            .collect();
        Self::new(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    /// Replays canned answers; `None` entries cancel.
    struct ScriptedPrompter {
        answers: VecDeque<Option<String>>,
        confirm: bool,
        prompts: usize,
    }

    impl ScriptedPrompter {
        fn new(answers: &[Option<&str>], confirm: bool) -> Self {
            Self {
                answers: answers.iter().map(|a| a.map(str::to_string)).collect(),
                confirm,
                prompts: 0,
            }
        }
    }

    impl Prompter for ScriptedPrompter {
        fn prompt(&mut self, _label: &str, _current: &str) -> Option<String> {
            self.prompts += 1;
            self.answers.pop_front().flatten()
        }

        fn confirm(&mut self, _message: &str) -> bool {
            self.confirm
        }
    }

    fn new_entry(term: &str) -> NewEntry {
        NewEntry {
            term: term.to_string(),
            reading: "よみ".to_string(),
            meaning: "意味".to_string(),
            category: Category::Other,
        }
    }

    #[test]
    fn test_search_is_case_insensitive_across_fields() {
        let glossary = Glossary::finance();
        let by_term: Vec<_> = glossary.search("gdp").iter().map(|e| e.id).collect();
        assert_eq!(by_term, [1]);

        let by_reading = glossary.search("かわせ");
        assert_eq!(by_reading.len(), 1);
        assert_eq!(by_reading[0].term, "為替レート");

        let by_meaning = glossary.search("GROSS domestic");
        assert_eq!(by_meaning.len(), 1);

        assert!(glossary.search("bitcoin").is_empty());
    }

    #[test]
    fn test_blank_search_returns_everything() {
        let glossary = Glossary::finance();
        assert_eq!(glossary.search("   ").len(), 14);
    }

    #[test]
    fn test_add_assigns_next_id_and_sorts() {
        let mut glossary = Glossary::finance();
        let added = glossary.add(new_entry("  ETF ")).unwrap();
        assert_eq!(added.id, 15);
        assert_eq!(added.term, "ETF");

        let terms: Vec<_> = glossary.entries().iter().map(|e| e.term.as_str()).collect();
        let mut sorted = terms.clone();
        sorted.sort_by(|a, b| collate(a, b));
        assert_eq!(terms, sorted);
        // Latin terms sort ahead of kana
        assert_eq!(terms[0], "ETF");
        assert_eq!(terms[1], "GDP");

        let second = glossary.add(new_entry("NISA")).unwrap();
        assert_eq!(second.id, 16);
    }

    #[test]
    fn test_add_rejects_case_insensitive_duplicate() {
        let mut glossary = Glossary::finance();
        let before = glossary.entries().to_vec();
        let err = glossary.add(new_entry("gdp")).unwrap_err();
        assert_eq!(err, GlossaryError::DuplicateTerm("gdp".to_string()));
        assert_eq!(glossary.entries(), before.as_slice());
    }

    #[test]
    fn test_add_rejects_missing_fields() {
        let mut glossary = Glossary::finance();
        let mut entry = new_entry("ETF");
        entry.meaning = "  ".to_string();
        assert_eq!(glossary.add(entry).unwrap_err(), GlossaryError::MissingField);
        assert_eq!(glossary.entries().len(), 14);
    }

    #[test]
    fn test_collation_folds_katakana() {
        assert_eq!(collate("カワセ", "かわせ"), Ordering::Less);
        assert_eq!(collate("あ", "イ"), Ordering::Less);
        assert_eq!(collate("etf", "GDP"), Ordering::Less);
    }

    #[test]
    fn test_edit_updates_fields_and_keeps_blanks() {
        let mut glossary = Glossary::finance();
        let mut prompter = ScriptedPrompter::new(
            &[Some("国内総生産"), Some(""), Some("新しい意味"), Some("")],
            true,
        );
        let outcome = glossary.edit(1, &mut prompter).unwrap();

        let EditOutcome::Updated(entry) = outcome else {
            panic!("expected an update, got {outcome:?}");
        };
        assert_eq!(entry.term, "国内総生産");
        assert_eq!(entry.reading, "ジーディーピー");
        assert_eq!(entry.meaning, "新しい意味");
        assert_eq!(entry.category, Category::Economy);
        assert_eq!(glossary.get(1), Some(&entry));
    }

    #[test]
    fn test_edit_cancel_leaves_entry() {
        let mut glossary = Glossary::finance();
        let before = glossary.get(2).cloned();
        let mut prompter = ScriptedPrompter::new(&[Some("changed"), None], true);
        assert_eq!(glossary.edit(2, &mut prompter).unwrap(), EditOutcome::Cancelled);
        assert_eq!(prompter.prompts, 2);
        assert_eq!(glossary.get(2).cloned(), before);
    }

    #[test]
    fn test_edit_rejects_unknown_category() {
        let mut glossary = Glossary::finance();
        let before = glossary.get(3).cloned();
        let mut prompter =
            ScriptedPrompter::new(&[Some(""), Some(""), Some(""), Some("料理")], true);
        let err = glossary.edit(3, &mut prompter).unwrap_err();
        assert!(matches!(err, GlossaryError::InvalidCategory(_)));
        assert_eq!(glossary.get(3).cloned(), before);
    }

    #[test]
    fn test_crypto_category_is_not_assignable() {
        assert!(matches!(
            "仮想通貨".parse::<Category>(),
            Err(GlossaryError::InvalidCategory(_))
        ));
        assert!("crypto".parse::<Category>().is_err());
        assert_eq!("銀行".parse::<Category>(), Ok(Category::Banking));

        let mut glossary = Glossary::finance();
        let before = glossary.get(4).cloned();
        let mut prompter =
            ScriptedPrompter::new(&[Some(""), Some(""), Some(""), Some("仮想通貨")], true);
        let err = glossary.edit(4, &mut prompter).unwrap_err();
        assert!(matches!(err, GlossaryError::InvalidCategory(_)));
        assert_eq!(glossary.get(4).cloned(), before);
    }

    #[test]
    fn test_edit_and_delete_unknown_id_are_noops() {
        let mut glossary = Glossary::finance();
        let mut prompter = ScriptedPrompter::new(&[], true);
        assert_eq!(glossary.edit(99, &mut prompter).unwrap(), EditOutcome::NotFound);
        assert_eq!(glossary.delete(99, &mut prompter), DeleteOutcome::NotFound);
        assert_eq!(prompter.prompts, 0);
        assert_eq!(glossary.entries().len(), 14);
    }

    #[test]
    fn test_delete_requires_confirmation() {
        let mut glossary = Glossary::finance();

        let mut decline = ScriptedPrompter::new(&[], false);
        assert_eq!(glossary.delete(5, &mut decline), DeleteOutcome::Cancelled);
        assert!(glossary.get(5).is_some());

        let mut accept = ScriptedPrompter::new(&[], true);
        let DeleteOutcome::Deleted(entry) = glossary.delete(5, &mut accept) else {
            panic!("expected deletion");
        };
        assert_eq!(entry.term, "累進課税");
        assert!(glossary.get(5).is_none());
        assert_eq!(glossary.entries().len(), 13);

        // Ids are never reused
        assert_eq!(glossary.add(new_entry("ETF")).unwrap().id, 15);
    }

    #[test]
    fn test_category_parsing() {
        assert_eq!("税金".parse::<Category>().unwrap(), Category::Tax);
        assert_eq!("Banking".parse::<Category>().unwrap(), Category::Banking);
        assert!("food".parse::<Category>().is_err());
    }
}
