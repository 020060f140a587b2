//! Crypto term list shown next to the market table.
//!
//! Terms are grouped into sections. The display order puts kana terms first
//! in Japanese reading order, then latin terms alphabetically.

use super::glossary::collate;
use super::quiz::TermDefinition;
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CryptoTerm {
    pub section: &'static str,
    pub term: &'static str,
    pub definition: &'static str,
}

impl TermDefinition for CryptoTerm {
    fn term(&self) -> &str {
        self.term
    }

    fn definition(&self) -> &str {
        self.definition
    }
}

type Section = (&'static str, &'static [(&'static str, &'static str)]);

static SECTIONS: [Section; 3] = [
    (
        "基本構造",
        &[
            (
                "ブロックチェーン",
                "取引データが鎖のようにつながった分散型台帳。改ざんが極めて困難。",
            ),
            ("トランザクション", "ブロックチェーンに記録される 1 件の取引。"),
            (
                "ブロック",
                "複数トランザクションを束ねたデータ。ブロック単位で追加。",
            ),
            (
                "コンセンサスアルゴリズム",
                "ネットワーク全体が同じ台帳に合意する仕組み。PoW や PoS など。",
            ),
            (
                "スマートコントラクト",
                "あらかじめ設定された条件が満たされると自動的に取引や処理を実行するブロックチェーン上のプログラム",
            ),
            (
                "ノード",
                "ブロックチェーン上で取引データを保管し他の参加者と情報を相互に共有・検証する役割を持つコンピュータ。",
            ),
            (
                "マイニング",
                "ブロックチェーン上の取引が正しいことを大量計算で証明し、その見返りに新しい仮想通貨を受け取る仕組み",
            ),
            (
                "Lightning Network",
                "ビットコインなどの送金をブロックチェーン外でまとめて瞬時・低手数料で決済し、最終結果だけをチェーンに記録して混雑を解消する仕組み",
            ),
            (
                "dApp（分散型アプリ）",
                "ブロックチェーン上で動きスマートコントラクトにより中央管理者なしで自動実行されるアプリケーション",
            ),
        ],
    ),
    (
        "通貨・トークンの種類",
        &[
            ("仮想通貨／暗号資産", "インターネット上だけで存在するお金。"),
            ("トークン", "他チェーンを利用して発行されたデジタル資産。"),
            ("ステーブルコイン", "法定通貨と価値を連動させたトークン。"),
            ("NFT", "唯一性を証明できるデジタル所有権トークン。"),
            (
                "ステーキング",
                "保有する仮想通貨をネットワークに預けて取引承認に参加し、その報酬として新規コインや手数料を受け取る運用方法。",
            ),
            (
                "ブリッジ",
                "異なるブロックチェーン間でトークンやデータを移動・交換できるようにする中継プロトコル。",
            ),
            (
                "L2（レイヤー2）",
                "メインのブロックチェーン外で多数の取引を処理し、最終結果だけをチェーンに書き込むことで速度向上と手数料削減を図る拡張技術。",
            ),
            (
                "L2",
                "メインのブロックチェーン外で多数の取引を処理し、最終結果だけをチェーンに書き込むことで速度向上と手数料削減を図る拡張技術。",
            ),
            (
                "ガス代",
                "ブロックチェーン上で取引やスマートコントラクトを実行する際に支払う手数料で、ネットワークの計算資源使用料に相当する。",
            ),
            (
                "DeFi（分散型金融）",
                "中央の銀行や仲介を介さず、ブロックチェーン上のスマートコントラクトで貸借・送金・取引など金融サービスを提供する仕組み。",
            ),
            (
                "DeFi",
                "分散型金融(Decentralized Finance)の略称。ブロックチェーン上の無許可型金融サービス全般を指す。",
            ),
            (
                "セービング商品",
                "取引所などに仮想通貨を一定期間預け、利息（年利/APY）を受け取る“暗号資産版の預金”サービス。",
            ),
            (
                "オーダーブック",
                "取引所が保有する、ある銘柄について現在出ている買い注文（Bid）と売り注文（Ask）を価格順に並べたリアルタイム一覧表。",
            ),
            (
                "バリデータ",
                "PoS系ネットワークでトランザクションを検証しブロックを承認する権限を持つノードで、ネットワークの安全性を保つ要。",
            ),
            (
                "クロスチェーン",
                "異なるブロックチェーン間でトークンやデータを相互移動・相互運用できるようにする技術。",
            ),
            (
                "PoS（Proof of Stake）",
                "コイン保有量（ステーク）に応じて取引承認者を選び、低消費電力でブロック生成を行うコンセンサスメカニズム。",
            ),
            (
                "PoS",
                "Proof of Stake の略称。保有量に応じてブロック承認権を与えるコンセンサスメカニズム。",
            ),
            (
                "RWA",
                "Real World Assets の略称。不動産や株式など現実資産をトークン化してブロックチェーン上で売買できるようにする仕組み。",
            ),
            (
                "GameFi",
                "ゲームと DeFi を組み合わせ、プレイや NFT 取引で仮想通貨を稼げるブロックチェーンゲームの総称。",
            ),
            (
                "DePIN",
                "Decentralized Physical Infrastructure Networks の略称。トークン報酬で通信やストレージなどのインフラを分散型で構築・運営する取り組み。",
            ),
            (
                "焼却",
                "トークンを回収不可能なアドレスに送って供給量を永久に減らすこと。バーンとも呼ばれる。",
            ),
            ("バーン", "トークン焼却（Burn）のカタカナ表現。同義語。"),
            (
                "レンディング",
                "保有する仮想通貨を貸し出し、利息として同じ銘柄を受け取る運用方法。",
            ),
        ],
    ),
    (
        "ウォレット & 鍵管理",
        &[
            ("ウォレット", "仮想通貨を保管し署名するソフトや機器。"),
            (
                "公開鍵 / アドレス",
                "お金を受け取るために共有する口座番号のようなもの。",
            ),
            ("秘密鍵", "資産を動かすための暗証番号＋印鑑。漏洩厳禁。"),
            (
                "ホットウォレット(オンライン型)",
                "オンライン保管で利便性高いがハッキングに注意。",
            ),
            (
                "コールドウォレット(ハードウェア型)",
                "オフライン保管で高セキュリティ。",
            ),
            (
                "オンライン型",
                "インターネット接続された環境で保管・利用する形式。利便性が高い反面ハッキングリスクが大きい。",
            ),
            (
                "ハードウェア型",
                "専用デバイスに秘密鍵を隔離保管する形式。オフラインで高いセキュリティを確保できる。",
            ),
        ],
    ),
];

/// Short forms that duplicate a longer entry and are left out of the
/// display list.
const SHORT_FORMS: [&str; 3] = ["L2", "DeFi", "PoS"];

/// Readings for terms whose kanji would otherwise sort out of place.
const READINGS: [(&str, &str); 5] = [
    ("焼却", "ショウキャク"),
    ("バーン", "バーン"),
    ("仮想通貨／暗号資産", "カソウツウカ"),
    ("公開鍵 / アドレス", "コウカイカギ"),
    ("秘密鍵", "ヒミツカギ"),
];

/// Every term in section order, short forms included.
pub fn all_terms() -> Vec<CryptoTerm> {
    SECTIONS
        .iter()
        .flat_map(|&(section, terms)| {
            terms.iter().map(move |&(term, definition)| CryptoTerm {
                section,
                term,
                definition,
            })
        })
        .collect()
}

fn sort_key(term: &str) -> String {
    match READINGS.iter().find(|(t, _)| *t == term) {
        Some((_, reading)) => reading.to_string(),
        None => term
            .chars()
            .filter(|c| !c.is_whitespace() && !"/・／()（）".contains(*c))
            .collect(),
    }
}

/// Display list: short forms and repeats removed, kana terms by reading,
/// then latin terms ignoring case.
pub fn display_terms() -> Vec<CryptoTerm> {
    let mut seen = HashSet::new();
    let (mut latin, mut kana): (Vec<_>, Vec<_>) = all_terms()
        .into_iter()
        .filter(|t| !SHORT_FORMS.contains(&t.term) && seen.insert(t.term))
        .partition(|t| t.term.starts_with(|c: char| c.is_ascii_alphabetic()));

    kana.sort_by(|a, b| collate(&sort_key(a.term), &sort_key(b.term)));
    latin.sort_by_key(|t| t.term.to_lowercase());
    kana.extend(latin);
    kana
}

/// Case-insensitive substring search over term and definition. A blank
/// query returns every term.
pub fn search<'a>(terms: &'a [CryptoTerm], query: &str) -> Vec<&'a CryptoTerm> {
    let needle = query.trim().to_lowercase();
    terms
        .iter()
        .filter(|t| {
            needle.is_empty()
                || t.term.to_lowercase().contains(&needle)
                || t.definition.to_lowercase().contains(&needle)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position(terms: &[CryptoTerm], term: &str) -> usize {
        terms.iter().position(|t| t.term == term).unwrap()
    }

    #[test]
    fn test_all_terms_keep_sections() {
        let terms = all_terms();
        assert_eq!(terms.len(), 39);
        assert_eq!(terms[0].section, "基本構造");
        assert_eq!(terms[0].term, "ブロックチェーン");
        assert_eq!(terms.last().unwrap().section, "ウォレット & 鍵管理");
    }

    #[test]
    fn test_display_terms_drop_short_forms() {
        let terms = display_terms();
        assert_eq!(terms.len(), 36);
        for short in SHORT_FORMS {
            assert!(terms.iter().all(|t| t.term != short));
        }
        assert!(terms.iter().any(|t| t.term == "DeFi（分散型金融）"));
    }

    #[test]
    fn test_display_terms_put_kana_before_latin() {
        let terms = display_terms();
        let first_latin = terms
            .iter()
            .position(|t| t.term.starts_with(|c: char| c.is_ascii_alphabetic()))
            .unwrap();
        assert!(
            terms[first_latin..]
                .iter()
                .all(|t| t.term.starts_with(|c: char| c.is_ascii_alphabetic()))
        );

        let latin: Vec<_> = terms[first_latin..].iter().map(|t| t.term).collect();
        assert_eq!(
            latin,
            [
                "dApp（分散型アプリ）",
                "DeFi（分散型金融）",
                "DePIN",
                "GameFi",
                "L2（レイヤー2）",
                "Lightning Network",
                "NFT",
                "PoS（Proof of Stake）",
                "RWA",
            ]
        );
    }

    #[test]
    fn test_kana_terms_follow_reading_order() {
        let terms = display_terms();
        assert_eq!(terms[0].term, "ウォレット");
        // 焼却 sorts as しょうきゃく, 秘密鍵 as ひみつかぎ
        assert!(position(&terms, "コンセンサスアルゴリズム") < position(&terms, "焼却"));
        assert!(position(&terms, "焼却") < position(&terms, "ステーキング"));
        assert!(position(&terms, "秘密鍵") < position(&terms, "ブロック"));
        assert!(position(&terms, "仮想通貨／暗号資産") < position(&terms, "ガス代"));
    }

    #[test]
    fn test_search() {
        let terms = display_terms();
        let hits: Vec<_> = search(&terms, "nft").iter().map(|t| t.term).collect();
        assert!(hits.contains(&"NFT"));
        assert!(hits.contains(&"GameFi"));
        assert_eq!(search(&terms, "ウォレット").len(), 3);
        assert_eq!(search(&terms, " ").len(), terms.len());
        assert!(search(&terms, "住宅ローン").is_empty());
    }
}
