/*
 * src/kana_data.rs
 * 五十音データ (かな一覧) を管理するモジュール
 */

/// 文字の種類
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Script {
    Hiragana,
    Katakana,
}

/// 音の分類 (半濁音は濁音に含める)
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum SoundClass {
    Seion,  // 清音
    Dakuon, // 濁音・半濁音
    Yoon,   // 拗音
}

/// かな1文字 (拗音は2文字) 分のデータ
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SyllableEntry {
    pub id: &'static str,        // 一意なID ("kana_あ")
    pub kana: &'static str,      // 表示用の文字
    pub romaji: &'static str,    // 回答後に表示するローマ字 (ヘボン式)
    pub audio_key: &'static str, // Riyutool の音声ファイル名
    pub script: Script,
    pub sound_class: SoundClass,
    pub origin: &'static str,    // 字源の漢字
}

/// IDは文字から自動生成する
macro_rules! kana {
    ($kana:literal, $romaji:literal, $key:literal, $script:ident, $class:ident, $origin:literal) => {
        SyllableEntry {
            id: concat!("kana_", $kana),
            kana: $kana,
            romaji: $romaji,
            audio_key: $key,
            script: Script::$script,
            sound_class: SoundClass::$class,
            origin: $origin,
        }
    };
}

/// かな一覧 (起動中は変更しない)
pub const KANA_LIST: &[SyllableEntry] = &[
    // --- 清音 ひらがな ---
    kana!("あ", "a", "a", Hiragana, Seion, "安"),
    kana!("い", "i", "i", Hiragana, Seion, "以"),
    kana!("う", "u", "u", Hiragana, Seion, "宇"),
    kana!("え", "e", "e", Hiragana, Seion, "衣"),
    kana!("お", "o", "o", Hiragana, Seion, "於"),
    kana!("か", "ka", "ka", Hiragana, Seion, "加"),
    kana!("き", "ki", "ki", Hiragana, Seion, "幾"),
    kana!("く", "ku", "ku", Hiragana, Seion, "久"),
    kana!("け", "ke", "ke", Hiragana, Seion, "計"),
    kana!("こ", "ko", "ko", Hiragana, Seion, "己"),
    kana!("さ", "sa", "sa", Hiragana, Seion, "左"),
    kana!("し", "shi", "si", Hiragana, Seion, "之"),
    kana!("す", "su", "su", Hiragana, Seion, "寸"),
    kana!("せ", "se", "se", Hiragana, Seion, "世"),
    kana!("そ", "so", "so", Hiragana, Seion, "曽"),
    kana!("た", "ta", "ta", Hiragana, Seion, "太"),
    kana!("ち", "chi", "ti", Hiragana, Seion, "知"),
    kana!("つ", "tsu", "tu", Hiragana, Seion, "川"),
    kana!("て", "te", "te", Hiragana, Seion, "天"),
    kana!("と", "to", "to", Hiragana, Seion, "止"),
    kana!("な", "na", "na", Hiragana, Seion, "奈"),
    kana!("に", "ni", "ni", Hiragana, Seion, "仁"),
    kana!("ぬ", "nu", "nu", Hiragana, Seion, "奴"),
    kana!("ね", "ne", "ne", Hiragana, Seion, "祢"),
    kana!("の", "no", "no", Hiragana, Seion, "乃"),
    kana!("は", "ha", "ha", Hiragana, Seion, "波"),
    kana!("ひ", "hi", "hi", Hiragana, Seion, "比"),
    kana!("ふ", "fu", "hu", Hiragana, Seion, "不"),
    kana!("へ", "he", "he", Hiragana, Seion, "部"),
    kana!("ほ", "ho", "ho", Hiragana, Seion, "保"),
    kana!("ま", "ma", "ma", Hiragana, Seion, "末"),
    kana!("み", "mi", "mi", Hiragana, Seion, "美"),
    kana!("む", "mu", "mu", Hiragana, Seion, "武"),
    kana!("め", "me", "me", Hiragana, Seion, "女"),
    kana!("も", "mo", "mo", Hiragana, Seion, "毛"),
    kana!("や", "ya", "ya", Hiragana, Seion, "也"),
    kana!("ゆ", "yu", "yu", Hiragana, Seion, "由"),
    kana!("よ", "yo", "yo", Hiragana, Seion, "与"),
    kana!("ら", "ra", "ra", Hiragana, Seion, "良"),
    kana!("り", "ri", "ri", Hiragana, Seion, "利"),
    kana!("る", "ru", "ru", Hiragana, Seion, "留"),
    kana!("れ", "re", "re", Hiragana, Seion, "礼"),
    kana!("ろ", "ro", "ro", Hiragana, Seion, "呂"),
    kana!("わ", "wa", "wa", Hiragana, Seion, "和"),
    kana!("を", "wo", "o", Hiragana, Seion, "遠"),
    kana!("ん", "n", "n", Hiragana, Seion, "无"),

    // --- 清音 カタカナ ---
    kana!("ア", "a", "a", Katakana, Seion, "阿"),
    kana!("イ", "i", "i", Katakana, Seion, "伊"),
    kana!("ウ", "u", "u", Katakana, Seion, "宇"),
    kana!("エ", "e", "e", Katakana, Seion, "江"),
    kana!("オ", "o", "o", Katakana, Seion, "於"),
    kana!("カ", "ka", "ka", Katakana, Seion, "加"),
    kana!("キ", "ki", "ki", Katakana, Seion, "幾"),
    kana!("ク", "ku", "ku", Katakana, Seion, "久"),
    kana!("ケ", "ke", "ke", Katakana, Seion, "介"),
    kana!("コ", "ko", "ko", Katakana, Seion, "己"),
    kana!("サ", "sa", "sa", Katakana, Seion, "散"),
    kana!("シ", "shi", "si", Katakana, Seion, "之"),
    kana!("ス", "su", "su", Katakana, Seion, "須"),
    kana!("セ", "se", "se", Katakana, Seion, "世"),
    kana!("ソ", "so", "so", Katakana, Seion, "曽"),
    kana!("タ", "ta", "ta", Katakana, Seion, "多"),
    kana!("チ", "chi", "ti", Katakana, Seion, "千"),
    kana!("ツ", "tsu", "tu", Katakana, Seion, "川"),
    kana!("テ", "te", "te", Katakana, Seion, "天"),
    kana!("ト", "to", "to", Katakana, Seion, "止"),
    kana!("ナ", "na", "na", Katakana, Seion, "奈"),
    kana!("ニ", "ni", "ni", Katakana, Seion, "仁"),
    kana!("ヌ", "nu", "nu", Katakana, Seion, "奴"),
    kana!("ネ", "ne", "ne", Katakana, Seion, "祢"),
    kana!("ノ", "no", "no", Katakana, Seion, "乃"),
    kana!("ハ", "ha", "ha", Katakana, Seion, "八"),
    kana!("ヒ", "hi", "hi", Katakana, Seion, "比"),
    kana!("フ", "fu", "hu", Katakana, Seion, "不"),
    kana!("ヘ", "he", "he", Katakana, Seion, "部"),
    kana!("ホ", "ho", "ho", Katakana, Seion, "保"),
    kana!("マ", "ma", "ma", Katakana, Seion, "末"),
    kana!("ミ", "mi", "mi", Katakana, Seion, "三"),
    kana!("ム", "mu", "mu", Katakana, Seion, "牟"),
    kana!("メ", "me", "me", Katakana, Seion, "女"),
    kana!("モ", "mo", "mo", Katakana, Seion, "毛"),
    kana!("ヤ", "ya", "ya", Katakana, Seion, "也"),
    kana!("ユ", "yu", "yu", Katakana, Seion, "由"),
    kana!("ヨ", "yo", "yo", Katakana, Seion, "与"),
    kana!("ラ", "ra", "ra", Katakana, Seion, "良"),
    kana!("リ", "ri", "ri", Katakana, Seion, "利"),
    kana!("ル", "ru", "ru", Katakana, Seion, "流"),
    kana!("レ", "re", "re", Katakana, Seion, "礼"),
    kana!("ロ", "ro", "ro", Katakana, Seion, "呂"),
    kana!("ワ", "wa", "wa", Katakana, Seion, "和"),
    kana!("ヲ", "wo", "o", Katakana, Seion, "乎"),
    kana!("ン", "n", "n", Katakana, Seion, "尔"),

    // --- 濁音・半濁音 ひらがな ---
    kana!("が", "ga", "ga", Hiragana, Dakuon, "加"),
    kana!("ぎ", "gi", "gi", Hiragana, Dakuon, "幾"),
    kana!("ぐ", "gu", "gu", Hiragana, Dakuon, "久"),
    kana!("げ", "ge", "ge", Hiragana, Dakuon, "計"),
    kana!("ご", "go", "go", Hiragana, Dakuon, "己"),
    kana!("ざ", "za", "za", Hiragana, Dakuon, "左"),
    kana!("じ", "ji", "zi", Hiragana, Dakuon, "之"),
    kana!("ず", "zu", "zu", Hiragana, Dakuon, "寸"),
    kana!("ぜ", "ze", "ze", Hiragana, Dakuon, "世"),
    kana!("ぞ", "zo", "zo", Hiragana, Dakuon, "曽"),
    kana!("だ", "da", "da", Hiragana, Dakuon, "太"),
    kana!("ぢ", "ji", "di", Hiragana, Dakuon, "知"),
    kana!("づ", "zu", "du", Hiragana, Dakuon, "川"),
    kana!("で", "de", "de", Hiragana, Dakuon, "天"),
    kana!("ど", "do", "do", Hiragana, Dakuon, "止"),
    kana!("ば", "ba", "ba", Hiragana, Dakuon, "波"),
    kana!("び", "bi", "bi", Hiragana, Dakuon, "比"),
    kana!("ぶ", "bu", "bu", Hiragana, Dakuon, "不"),
    kana!("べ", "be", "be", Hiragana, Dakuon, "部"),
    kana!("ぼ", "bo", "bo", Hiragana, Dakuon, "保"),
    kana!("ぱ", "pa", "pa", Hiragana, Dakuon, "波"),
    kana!("ぴ", "pi", "pi", Hiragana, Dakuon, "比"),
    kana!("ぷ", "pu", "pu", Hiragana, Dakuon, "不"),
    kana!("ぺ", "pe", "pe", Hiragana, Dakuon, "部"),
    kana!("ぽ", "po", "po", Hiragana, Dakuon, "保"),

    // --- 濁音・半濁音 カタカナ ---
    kana!("ガ", "ga", "ga", Katakana, Dakuon, "加"),
    kana!("ギ", "gi", "gi", Katakana, Dakuon, "幾"),
    kana!("グ", "gu", "gu", Katakana, Dakuon, "久"),
    kana!("ゲ", "ge", "ge", Katakana, Dakuon, "介"),
    kana!("ゴ", "go", "go", Katakana, Dakuon, "己"),
    kana!("ザ", "za", "za", Katakana, Dakuon, "散"),
    kana!("ジ", "ji", "zi", Katakana, Dakuon, "之"),
    kana!("ズ", "zu", "zu", Katakana, Dakuon, "須"),
    kana!("ゼ", "ze", "ze", Katakana, Dakuon, "世"),
    kana!("ゾ", "zo", "zo", Katakana, Dakuon, "曽"),
    kana!("ダ", "da", "da", Katakana, Dakuon, "多"),
    kana!("ヂ", "ji", "di", Katakana, Dakuon, "千"),
    kana!("ヅ", "zu", "du", Katakana, Dakuon, "川"),
    kana!("デ", "de", "de", Katakana, Dakuon, "天"),
    kana!("ド", "do", "do", Katakana, Dakuon, "止"),
    kana!("バ", "ba", "ba", Katakana, Dakuon, "八"),
    kana!("ビ", "bi", "bi", Katakana, Dakuon, "比"),
    kana!("ブ", "bu", "bu", Katakana, Dakuon, "不"),
    kana!("ベ", "be", "be", Katakana, Dakuon, "部"),
    kana!("ボ", "bo", "bo", Katakana, Dakuon, "保"),
    kana!("パ", "pa", "pa", Katakana, Dakuon, "八"),
    kana!("ピ", "pi", "pi", Katakana, Dakuon, "比"),
    kana!("プ", "pu", "pu", Katakana, Dakuon, "不"),
    kana!("ペ", "pe", "pe", Katakana, Dakuon, "部"),
    kana!("ポ", "po", "po", Katakana, Dakuon, "保"),

    // --- 拗音 ひらがな ---
    kana!("きゃ", "kya", "kya", Hiragana, Yoon, "加也"),
    kana!("きゅ", "kyu", "kyu", Hiragana, Yoon, "加由"),
    kana!("きょ", "kyo", "kyo", Hiragana, Yoon, "加与"),
    kana!("しゃ", "sha", "sya", Hiragana, Yoon, "之也"),
    kana!("しゅ", "shu", "syu", Hiragana, Yoon, "之由"),
    kana!("しょ", "sho", "syo", Hiragana, Yoon, "之与"),
    kana!("ちゃ", "cha", "tya", Hiragana, Yoon, "知也"),
    kana!("ちゅ", "chu", "cyu", Hiragana, Yoon, "知由"),
    kana!("ちょ", "cho", "tyo", Hiragana, Yoon, "知与"),

    // --- 拗音 カタカナ ---
    kana!("キャ", "kya", "kya", Katakana, Yoon, "加也"),
    kana!("キュ", "kyu", "kyu", Katakana, Yoon, "加由"),
    kana!("キョ", "kyo", "kyo", Katakana, Yoon, "加与"),
    kana!("シャ", "sha", "sya", Katakana, Yoon, "之也"),
    kana!("シュ", "shu", "syu", Katakana, Yoon, "之由"),
    kana!("ショ", "sho", "syo", Katakana, Yoon, "之与"),
];

/// IDからかなを探す (リザルト画面用)
pub fn find_by_id(id: &str) -> Option<&'static SyllableEntry> {
    KANA_LIST.iter().find(|k| k.id == id)
}
