//! Reference cards for major world currencies.

/// Background on one currency: where it is used, its history and a few
/// notable facts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorldCurrency {
    pub code: &'static str,
    pub name: &'static str,
    pub symbol: &'static str,
    pub flag: &'static str,
    pub countries: &'static str,
    pub summary: &'static str,
    pub history: &'static str,
    pub features: &'static [&'static str],
    pub fact: &'static str,
}

pub static WORLD_CURRENCIES: [WorldCurrency; 12] = [
    WorldCurrency {
        code: "JPY",
        name: "日本円",
        symbol: "¥",
        flag: "🇯🇵",
        countries: "日本",
        summary: "日本の法定通貨",
        history: "現在の日本円制度は1871年（明治4年）の新貨条例により始まりました。戦後の1949年に1ドル=360円の固定レートが設定され、1973年に変動相場制に移行しました。",
        features: &[
            "世界第3位の取引量を誇る主要通貨",
            "安全資産として世界的に認識",
            "低金利政策で知られる",
            "紙幣は日本銀行券として発行",
        ],
        fact: "日本円は世界で最も偽造が困難な通貨の一つとされており、特に1万円札の透かしや特殊インクなどの技術は高く評価されています。",
    },
    WorldCurrency {
        code: "USD",
        name: "米ドル",
        symbol: "$",
        flag: "🇺🇸",
        countries: "アメリカ、エクアドル、エルサルバドル、パナマなど",
        summary: "世界の基軸通貨",
        history: "1792年の造幣法により米ドルが誕生しました。1944年のブレトン・ウッズ協定により金本位制の下で国際基軸通貨となり、1971年のニクソン・ショックで金本位制から離脱した後も基軸通貨の地位を維持しています。",
        features: &[
            "世界の外貨準備の約60%を占める",
            "国際貿易の約40%で使用される",
            "石油取引の主要決済通貨（ペトロダラー）",
            "世界最大の金融市場を持つ",
        ],
        fact: "「In God We Trust」（我々は神を信じる）は1956年から米ドル紙幣に印刷されており、アメリカの国家モットーでもあります。",
    },
    WorldCurrency {
        code: "EUR",
        name: "ユーロ",
        symbol: "€",
        flag: "🇪🇺",
        countries: "ドイツ、フランス、イタリア、スペイン、オランダなど19カ国",
        summary: "欧州連合の統一通貨",
        history: "1999年に電子通貨として導入され、2002年から紙幣・硬貨の流通が開始されました。欧州統合の象徴として、複数の独立国が共通通貨を使用する史上最大の通貨統合プロジェクトです。",
        features: &[
            "世界第2位の取引量を持つ通貨",
            "19カ国・約3億4千万人が使用",
            "ユーロ建て債券市場は世界第2位",
            "欧州中央銀行（ECB）が金融政策を統括",
        ],
        fact: "ユーロ紙幣のデザインは実在しない建築物をモチーフにしており、特定の国に偏らないよう配慮されています。橋や門などのデザインは「協力」と「開放性」を象徴しています。",
    },
    WorldCurrency {
        code: "GBP",
        name: "英ポンド",
        symbol: "£",
        flag: "🇬🇧",
        countries: "イギリス（イングランド、スコットランド、ウェールズ、北アイルランド）",
        summary: "世界最古の現存する通貨の一つ",
        history: "起源は8世紀のアングロサクソン時代まで遡ります。現在の形態は1694年のイングランド銀行設立とともに確立されました。19世紀から20世紀初頭まで国際基軸通貨として機能していました。",
        features: &[
            "1200年以上の歴史を持つ",
            "世界第4位の取引量",
            "ロンドンは世界最大の外国為替市場",
            "Brexit後も国際金融の重要拠点",
        ],
        fact: "ポンド記号「£」はラテン語の「libra」（天秤）に由来し、これは重量の単位でもありました。1ポンド＝約453.6グラムという重量単位も、この通貨から来ています。",
    },
    WorldCurrency {
        code: "CNY",
        name: "中国元",
        symbol: "¥",
        flag: "🇨🇳",
        countries: "中華人民共和国",
        summary: "中華人民共和国の法定通貨",
        history: "現在の人民元は1948年に中国人民銀行により発行が開始されました。改革開放政策以降、段階的に国際化が進み、2016年にはIMFの特別引出権（SDR）の構成通貨に加わりました。",
        features: &[
            "世界第2位の経済大国の通貨",
            "「一帯一路」政策で国際化を推進",
            "デジタル人民元（DCEP）を世界に先駆けて開発",
            "資本取引に一定の規制がある",
        ],
        fact: "人民元の紙幣には毛沢東の肖像が使われており、これは1999年の第5版紙幣から統一されました。また、「元」「圓」「块」などの複数の呼び方があります。",
    },
    WorldCurrency {
        code: "CAD",
        name: "カナダドル",
        symbol: "C$",
        flag: "🇨🇦",
        countries: "カナダ",
        summary: "カナダの法定通貨",
        history: "1858年にカナダ州の通貨として導入され、1867年のカナダ連邦成立とともに全国通貨となりました。1970年に変動相場制に移行し、資源国通貨として注目されています。",
        features: &[
            "コモディティ通貨として知られる",
            "原油価格との相関が高い",
            "世界で最も安全な紙幣技術を持つ",
            "2011年からプラスチック製紙幣を導入",
        ],
        fact: "カナダの紙幣は2011年からポリマー（プラスチック）製になり、偽造防止と耐久性が大幅に向上しました。また、カナダは世界で初めて色付きの硬貨を発行した国でもあります。",
    },
    WorldCurrency {
        code: "AUD",
        name: "オーストラリアドル",
        symbol: "A$",
        flag: "🇦🇺",
        countries: "オーストラリア、ナウル、ツバル、キリバス",
        summary: "南太平洋地域の主要通貨",
        history: "1966年にオーストラリア・ポンドに代わって導入されました。1983年に変動相場制に移行し、資源国通貨として国際市場で取引されています。",
        features: &[
            "世界初のプラスチック製紙幣を導入（1988年）",
            "鉱物資源価格と連動しやすい",
            "アジア太平洋地域の主要通貨",
            "高金利通貨として人気",
        ],
        fact: "オーストラリアは1988年に世界で初めてプラスチック製の紙幣を導入した国です。現在では30カ国以上がオーストラリアの技術を使用してプラスチック製紙幣を発行しています。",
    },
    WorldCurrency {
        code: "CHF",
        name: "スイスフラン",
        symbol: "Fr",
        flag: "🇨🇭",
        countries: "スイス、リヒテンシュタイン",
        summary: "安全資産として人気の通貨",
        history: "1850年にスイス連邦の統一通貨として導入されました。第二次世界大戦中に中立を保ったスイスの通貨として、安全資産としての地位を確立しました。",
        features: &[
            "世界最強の安全資産通貨の一つ",
            "インフレ率が非常に低い",
            "政治的安定性が高い",
            "プライベートバンキングの中心地",
        ],
        fact: "スイスフランは「CHF」と表記されますが、これは「Confoederatio Helvetica Franc」の略で、ラテン語でスイス連邦を意味します。スイスの公用語が4つあるため、中立的なラテン語が使われています。",
    },
    WorldCurrency {
        code: "SGD",
        name: "シンガポールドル",
        symbol: "S$",
        flag: "🇸🇬",
        countries: "シンガポール",
        summary: "東南アジアの金融ハブの通貨",
        history: "1967年にマレーシア・シンガポールドルから分離して誕生しました。シンガポールの急速な経済発展とともに、東南アジア地域の主要通貨となりました。",
        features: &[
            "東南アジアの金融センターの通貨",
            "通貨バスケット制による安定性",
            "世界第13位の取引量",
            "アジア太平洋地域のハブ通貨",
        ],
        fact: "シンガポールドルの紙幣には6つの言語（英語、中国語、マレー語、タミル語、アラビア語、ジャウィ文字）で額面が記載されており、多民族国家シンガポールの特徴を表しています。",
    },
    WorldCurrency {
        code: "KRW",
        name: "韓国ウォン",
        symbol: "₩",
        flag: "🇰🇷",
        countries: "韓国",
        summary: "大韓民国の法定通貨",
        history: "現在の韓国ウォンは1962年に導入されました（旧ウォンの1000分の1の価値）。1997年のアジア通貨危機を経て、現在は変動相場制のもとで取引されています。",
        features: &[
            "世界第16位の取引量",
            "IT・半導体産業の成長と連動",
            "北朝鮮ウォンとは別の通貨",
            "1、5、10、50、100、500ウォン硬貨が流通",
        ],
        fact: "韓国では1000ウォン未満の少額決済はほぼ完全にカードや電子決済に移行しており、現金使用率が世界で最も低い国の一つです。また、韓国ウォンの記号「₩」は「Won」の頭文字Wに由来します。",
    },
    WorldCurrency {
        code: "INR",
        name: "インドルピー",
        symbol: "₹",
        flag: "🇮🇳",
        countries: "インド",
        summary: "世界最大の人口を持つ国の通貨",
        history: "ルピーの語源は古代サンスクリット語の「銀」を意味する「ルーパ」に由来します。現在のインドルピーは1947年の独立とともに確立され、1993年に変動相場制に移行しました。",
        features: &[
            "世界最大の民主主義国家の通貨",
            "IT・ソフトウェア産業の成長で注目",
            "モディ政権下でデジタル化を推進",
            "2016年に高額紙幣廃止を実施",
        ],
        fact: "2016年11月、インド政府は突然500ルピー札と1000ルピー札の廃止を発表し、国民に新紙幣への交換を求めました。この政策は腐敗撲滅とデジタル決済促進を目的としていました。",
    },
    WorldCurrency {
        code: "BRL",
        name: "ブラジルレアル",
        symbol: "R$",
        flag: "🇧🇷",
        countries: "ブラジル",
        summary: "南米最大の経済国の通貨",
        history: "現在のレアルは1994年に導入され、それまでの激しいインフレーションを抑制することに成功しました。「レアル計画」として知られる経済安定化政策の一環として生まれました。",
        features: &[
            "南米最大の経済圏の通貨",
            "コモディティ価格に影響を受けやすい",
            "BRICs諸国の一つ",
            "サッカーワールドカップ、オリンピック開催国",
        ],
        fact: "ブラジルレアルの名前は、ポルトガル語・スペイン語で「王の」「現実の」という意味の「real」に由来します。過去には「レアル・デ・オウロ」（金のレアル）という通貨も存在していました。",
    },
];

/// Looks a currency up by ISO code, ignoring case and surrounding spaces.
pub fn find_currency(code: &str) -> Option<&'static WorldCurrency> {
    let code = code.trim();
    WORLD_CURRENCIES
        .iter()
        .find(|c| c.code.eq_ignore_ascii_case(code))
}
