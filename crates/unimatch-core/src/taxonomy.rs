//! Interest categories and their keyword variants.
//!
//! A taxonomy is plain data: each category lists the keywords used for direct
//! detection, the wider expansion list used for keyword boosting, the keywords
//! that trigger department exclusion, and an ordered list of intent rules
//! (regex source plus the intent the rule signals). Rules are compiled once by
//! the query interpreter; nothing here is evaluated.

use serde::{Deserialize, Serialize};

/// What a matching rule says about the user's attitude to a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntentKind {
    /// Rejection ("... istemiyorum"); the category is excluded.
    Negative,
    /// Enthusiasm ("... seviyorum"); included and boosted further.
    Positive,
    /// Career goal ("doktor olmak"); included.
    Career,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentRule {
    pub pattern: String,
    pub intent: IntentKind,
}

impl IntentRule {
    pub fn new(intent: IntentKind, pattern: impl Into<String>) -> Self {
        Self { pattern: pattern.into(), intent }
    }

    /// `subject` followed, at most one word later, by `predicate`.
    /// Both sides are regex alternations; `subject` may carry a suffix.
    pub fn near(intent: IntentKind, subject: &str, predicate: &str) -> Self {
        Self::new(intent, format!(r"(?:{subject})\S*(?:\s+\S+)?\s+(?:{predicate})"))
    }

    /// `predicate` immediately followed by `subject`.
    pub fn after(intent: IntentKind, predicate: &str, subject: &str) -> Self {
        Self::new(intent, format!(r"(?:{predicate})\s+(?:{subject})"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub label: String,
    /// Core keywords: direct detection in queries, token recognition in boosting.
    pub keywords: Vec<String>,
    /// Everything unioned in when the category takes part in keyword boosting.
    pub expansion: Vec<String>,
    /// Keywords that, next to a negation word, remove matching departments.
    #[serde(default)]
    pub exclusion: Vec<String>,
    #[serde(default)]
    pub rules: Vec<IntentRule>,
}

impl Category {
    /// True when `token` names this category or one of its core keywords.
    pub fn recognises(&self, token: &str) -> bool {
        self.label == token || self.keywords.iter().any(|k| k == token)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTaxonomy {
    pub categories: Vec<Category>,
    /// Words that, adjacent to an exclusion keyword, reject the category.
    pub negation_words: Vec<String>,
    /// Interest used when nothing was detected. An empty label disables it.
    #[serde(default = "default_fallback")]
    pub fallback_label: String,
}

fn default_fallback() -> String {
    "genel".to_string()
}

impl CategoryTaxonomy {
    pub fn get(&self, label: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.label == label)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|c| c.label.as_str())
    }
}

const NEGATIONS: &str = "sevmiyorum|istemiyorum|sevmem|olmasın|ilgilenmiyorum|nefret ediyorum|kötüyüm";
const ENTHUSIASM: &str = "seviyorum|istiyorum|bayılıyorum|ilgileniyorum|çok iyiyim";

struct Seed<'a> {
    label: &'a str,
    keywords: &'a [&'a str],
    expansion: &'a [&'a str],
    exclusion: &'a [&'a str],
    /// Subjects checked against negation and enthusiasm phrases.
    anchors: &'a str,
    career: &'a [(&'a str, &'a str)],
    extra: &'a [(IntentKind, &'a str)],
}

impl Seed<'_> {
    fn build(&self) -> Category {
        let owned = |xs: &[&str]| xs.iter().map(|s| (*s).to_string()).collect::<Vec<_>>();
        let mut rules = vec![
            IntentRule::near(IntentKind::Negative, self.anchors, NEGATIONS),
            IntentRule::after(IntentKind::Negative, NEGATIONS, self.anchors),
            IntentRule::near(IntentKind::Positive, self.anchors, ENTHUSIASM),
            IntentRule::after(IntentKind::Positive, "çok seviyorum|bayılıyorum", self.anchors),
        ];
        rules.extend(self.extra.iter().map(|(kind, p)| IntentRule::new(*kind, *p)));
        rules.extend(self.career.iter().map(|(s, p)| IntentRule::near(IntentKind::Career, s, p)));
        Category {
            label: self.label.to_string(),
            keywords: owned(self.keywords),
            expansion: owned(self.expansion),
            exclusion: owned(self.exclusion),
            rules,
        }
    }
}

impl Default for CategoryTaxonomy {
    fn default() -> Self {
        use IntentKind::{Negative, Positive};
        let seeds = [
            Seed {
                label: "teknoloji",
                keywords: &["teknoloji", "yazılım", "program", "kod", "bilgisayar"],
                expansion: &["teknoloji", "bilgisayar", "yazılım", "programlama", "web", "oyun", "dijital", "sistem", "kodlama", "algoritma", "veri", "yapay zeka", "robotik"],
                exclusion: &["teknoloji", "bilgisayar", "yazılım"],
                anchors: "teknoloji|bilgisayar|yazılım",
                career: &[
                    ("programcı|developer|yazılımcı", "olmak|istiyorum"),
                    ("yazılım", "geliştir|yapmak"),
                    ("bilgisayar", "program|mühendis"),
                    ("web", "site|tasarım|geliştir"),
                    ("oyun|mobil", "geliştir|yapmak"),
                ],
                extra: &[],
            },
            Seed {
                label: "sağlık",
                keywords: &["sağlık", "doktor", "hemşire", "tıp"],
                expansion: &["sağlık", "tıp", "hemşire", "hasta", "tedavi", "anestezi", "veteriner", "diş", "fizyoterapi", "biyoloji", "eczacılık", "laboratuvar"],
                exclusion: &["tıp", "tip", "sağlık", "hemşire", "diş", "veteriner", "eczacı"],
                anchors: "sağlık|tıp|doktor|hemşire",
                career: &[
                    ("doktor|hekim|tıp", "olmak|istiyorum|okumak"),
                    ("sağlık", "sektör|alan|çalışmak"),
                    ("hasta", "bakım|tedavi"),
                    ("hemşire|eczacı|veteriner", "olmak|çalış"),
                    ("tıbbi", "cihaz|teknoloji|analiz"),
                ],
                extra: &[(Negative, r"kan(?:dan)?\s+korkuyorum")],
            },
            Seed {
                label: "sanat",
                keywords: &["sanat", "tasarım", "yaratıcı", "grafik"],
                expansion: &["sanat", "tasarım", "grafik", "müzik", "sinema", "fotoğraf", "görsel", "yaratıcı", "moda", "animasyon", "illüstrasyon", "estetik"],
                exclusion: &["sanat", "tasarım", "müzik"],
                anchors: "sanat|tasarım|müzik",
                career: &[
                    ("sanat|tasarım", "yapmak|alan"),
                    ("grafik", "tasarım|yapmak"),
                    ("yaratıcı", "iş|alan"),
                    ("müzik|sinema|fotoğraf", "yapmak|alan"),
                    ("görsel", "sanat|tasarım"),
                ],
                extra: &[(Positive, r"yaratıcı\S*\s+(?:bir\s+)?(?:insanım|biriyim)")],
            },
            Seed {
                label: "mühendislik",
                keywords: &["mühendislik", "mühendis", "teknik"],
                expansion: &["mühendislik", "mühendis", "teknik", "endüstri", "makina", "elektrik", "inşaat", "çevre", "proje", "tasarım", "analiz", "yapı"],
                exclusion: &["mühendislik", "mühendis"],
                anchors: "mühendis|teknik",
                career: &[
                    ("mühendis", "olmak|istiyorum"),
                    ("makina|makine|elektrik|inşaat", "mühendis"),
                    ("teknik", "çalışmak|alan"),
                    ("proje", "yapmak|geliştir"),
                    ("sistem", "tasarım|geliştir"),
                ],
                extra: &[],
            },
            Seed {
                label: "hukuk",
                keywords: &["hukuk", "avukat", "mahkeme", "dava"],
                expansion: &["hukuk", "avukat", "mahkeme", "dava", "kanun", "yasa", "adalet", "hâkim", "savcı", "anayasa", "ceza", "medeni"],
                exclusion: &["hukuk", "avukat"],
                anchors: "hukuk|avukat",
                career: &[
                    ("avukat|hukuk", "olmak|istiyorum|okumak"),
                    ("hukuk", "alan|çalışmak|bölüm"),
                    ("adalet", "sistem|alan"),
                    ("dava", "takip|savunma"),
                    ("hâkim|hakim|savcı", "olmak|istiyorum"),
                ],
                extra: &[(Negative, r"hukuk\S*\s+(?:çok\s+)?sıkıcı")],
            },
            Seed {
                label: "finans",
                keywords: &["finans", "banka", "muhasebe"],
                expansion: &["finans", "banka", "borsa", "yatırım", "kredi", "sigorta", "muhasebe", "vergi", "ekonomi", "para", "döviz", "risk"],
                exclusion: &["finans", "banka"],
                anchors: "finans|banka|muhasebe",
                career: &[
                    ("bankacı|banker", "olmak|çalış"),
                    ("finans", "sektör|alan|uzman"),
                    ("borsa", "çalış|analiz"),
                    ("muhasebe", "yapmak|çalış"),
                    ("yatırım", "uzman|danışman"),
                ],
                extra: &[],
            },
            Seed {
                label: "işletme",
                keywords: &["işletme", "pazarlama", "yönetim"],
                expansion: &["işletme", "pazarlama", "muhasebe", "ticaret", "yönetim", "ekonomi", "finans", "satış", "girişimcilik", "lojistik", "insan kaynakları", "strateji"],
                exclusion: &["işletme", "pazarlama"],
                anchors: "işletme|pazarlama",
                career: &[
                    ("işletme", "çalış|yönetim"),
                    ("pazarlama", "yapmak|çalış"),
                    ("yönetici", "olmak|çalış"),
                    ("girişimci", "olmak|iş kurmak"),
                    ("satış", "yapmak|uzman"),
                ],
                extra: &[],
            },
            Seed {
                label: "eğitim",
                keywords: &["öğretmen", "eğitim", "ders"],
                expansion: &["eğitim", "öğretmen", "öğretim", "ders", "okul", "çocuk", "akademik", "öğrenci", "pedagoji", "psikoloji", "rehberlik", "müfredat"],
                exclusion: &["öğretmen", "eğitim"],
                anchors: "öğretmen|eğitim",
                career: &[
                    ("öğretmen", "olmak|istiyorum"),
                    ("eğitim", "vermek|çalışmak"),
                    ("ders", "vermek|anlatmak"),
                    ("çocuk", "gelişim|eğitim"),
                    ("akademisyen", "olmak|çalış"),
                ],
                extra: &[],
            },
            Seed {
                label: "spor",
                keywords: &["spor", "antrenör", "fitness"],
                expansion: &["spor", "antrenör", "fitness", "egzersiz", "rekreasyon", "beden", "atletik", "kondisyon", "performans", "müsabaka", "takım", "saha"],
                exclusion: &["spor", "fitness"],
                anchors: "spor|fitness",
                career: &[
                    ("antrenör", "olmak|çalış"),
                    ("spor", "alan|yapmak"),
                    ("fitness", "antrenör|çalış"),
                    ("beden eğitim", "öğretmen|çalış"),
                    ("egzersiz", "uzman|çalış"),
                ],
                extra: &[],
            },
            Seed {
                label: "gastronomi",
                keywords: &["aşçı", "mutfak", "yemek", "gastronomi"],
                expansion: &["gastronomi", "mutfak", "yemek", "aşçılık", "pasta", "şef", "fırıncılık", "gıda", "restoran", "menü", "lezzet", "sunum"],
                exclusion: &["gastronomi", "aşçılık"],
                anchors: "gastronomi|mutfak|yemek",
                career: &[
                    ("aşçı", "olmak|çalış"),
                    ("mutfak", "çalış|şef"),
                    ("yemek", "yapmak|pişirmek"),
                    ("gastronomi", "çalış|alan"),
                    ("restoran", "açmak|yönetim"),
                ],
                extra: &[],
            },
            Seed {
                label: "medya",
                keywords: &["medya", "gazete", "haber"],
                expansion: &["medya", "gazete", "televizyon", "radyo", "haber", "basın", "yayın", "sosyal medya", "reklam", "pazarlama", "içerik", "editör"],
                exclusion: &["medya", "gazetecilik"],
                anchors: "medya|gazete",
                career: &[
                    ("gazeteci", "olmak|çalış"),
                    ("medya", "çalış|sektör"),
                    ("televizyon", "çalış|program"),
                    ("sosyal medya", "uzman|çalış"),
                    ("reklam", "yapmak|çalış"),
                ],
                extra: &[],
            },
            Seed {
                label: "turizm",
                keywords: &["turizm", "otel", "seyahat"],
                expansion: &["turizm", "otel", "seyahat", "rehber", "konaklama", "resepsiyon", "acenta", "rezervasyon", "müze", "kültür", "tatil", "gezi"],
                exclusion: &["turizm", "otel"],
                anchors: "turizm|otel|seyahat",
                career: &[
                    ("turizm", "çalış|rehber"),
                    ("otel", "çalış|yönetim"),
                    ("seyahat", "acenta|rehber"),
                    ("tur", "rehber|operatör"),
                    ("konaklama", "çalış|yönetim"),
                ],
                extra: &[],
            },
            Seed {
                label: "güvenlik",
                keywords: &["güvenlik", "polis", "asker"],
                expansion: &["güvenlik", "polis", "asker", "koruma", "emniyet", "kurtarma", "savunma", "acil durum"],
                exclusion: &["güvenlik", "polis"],
                anchors: "güvenlik|polis|asker",
                career: &[("polis|asker", "olmak|istiyorum"), ("güvenlik", "alan|çalış")],
                extra: &[],
            },
            Seed {
                label: "tarım",
                keywords: &["tarım", "ziraat", "hayvancılık"],
                expansion: &["tarım", "ziraat", "hayvancılık", "bitki", "toprak", "gıda", "orman", "çevre", "ekoloji", "sera", "tohum", "su ürünleri"],
                exclusion: &["tarım", "ziraat"],
                anchors: "tarım|ziraat",
                career: &[("tarım|ziraat", "çalış|alan|mühendis"), ("hayvan", "bakım|yetiştir")],
                extra: &[],
            },
            Seed {
                label: "matematik",
                keywords: &["matematik", "istatistik"],
                expansion: &["matematik", "istatistik", "hesap", "analiz", "sayısal", "formül", "olasılık", "aktüerya", "veri"],
                exclusion: &["matematik", "hesap"],
                anchors: "matematik|sayısal",
                career: &[("matematik|istatistik", "çalış|okumak|öğretmen")],
                extra: &[(Negative, r"matematik\S*\s+(?:çok\s+)?zor")],
            },
        ];

        Self {
            categories: seeds.iter().map(Seed::build).collect(),
            negation_words: ["istemiyorum", "sevmiyorum", "sevmem", "olmasın"].iter().map(|s| (*s).to_string()).collect(),
            fallback_label: default_fallback(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_taxonomy_is_well_formed() {
        let tax = CategoryTaxonomy::default();
        assert_eq!(tax.fallback_label, "genel");
        assert!(tax.categories.len() >= 12);
        for c in &tax.categories {
            assert!(!c.keywords.is_empty(), "{} has no keywords", c.label);
            assert!(!c.expansion.is_empty(), "{} has no expansion", c.label);
            assert!(c.rules.iter().any(|r| r.intent == IntentKind::Negative));
            assert!(c.rules.iter().any(|r| r.intent == IntentKind::Career));
        }
    }

    #[test]
    fn recognises_label_and_core_keywords() {
        let tax = CategoryTaxonomy::default();
        let tech = tax.get("teknoloji").expect("teknoloji");
        assert!(tech.recognises("teknoloji"));
        assert!(tech.recognises("yazılım"));
        assert!(!tech.recognises("robotik"));
    }

    #[test]
    fn taxonomy_survives_serde() {
        let tax = CategoryTaxonomy::default();
        let json = serde_json::to_string(&tax).expect("serialize");
        let back: CategoryTaxonomy = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(tax, back);
    }
}
