use unimatch_core::taxonomy::CategoryTaxonomy;
use unimatch_query::QueryInterpreter;

fn interpreter() -> QueryInterpreter {
    QueryInterpreter::new(&CategoryTaxonomy::default()).expect("default taxonomy compiles")
}

#[test]
fn enthusiasm_and_rank_in_one_sentence() {
    let q = interpreter().interpret("Bilgisayar ve yazılım seviyorum, sıralamam 45.000");
    assert_eq!(q.interest_tags, vec!["teknoloji".to_string()]);
    assert_eq!(q.positive, vec!["teknoloji".to_string()]);
    assert_eq!(q.target_rank, Some(45_000));
    assert_eq!(q.interest_text(), "teknoloji");
}

#[test]
fn rejection_in_one_clause_does_not_leak_into_another() {
    let q = interpreter().interpret("Mühendislik istiyorum ama tıp istemiyorum");
    assert!(q.interest_tags.contains(&"mühendislik".to_string()));
    assert!(!q.interest_tags.contains(&"sağlık".to_string()));
    assert_eq!(q.excluded, vec!["sağlık".to_string()]);
}

#[test]
fn rejected_category_wins_over_its_own_keyword() {
    let q = interpreter().interpret("sağlık sevmiyorum");
    assert!(q.excluded.contains(&"sağlık".to_string()));
    assert!(!q.interest_tags.contains(&"sağlık".to_string()));
}

#[test]
fn career_phrase_includes_category() {
    let q = interpreter().interpret("Doktor olmak istiyorum, 50 bin civarındayım");
    assert!(q.interest_tags.contains(&"sağlık".to_string()));
    assert_eq!(q.target_rank, Some(50_000));
}

#[test]
fn uppercase_turkish_is_folded() {
    let q = interpreter().interpret("SAĞLIK alanında çalışmak istiyorum");
    assert!(q.interest_tags.contains(&"sağlık".to_string()));
}

#[test]
fn phrase_level_negative_rule() {
    let q = interpreter().interpret("kandan korkuyorum ama insanlara yardım etmek isterim");
    assert!(q.excluded.contains(&"sağlık".to_string()));
}

#[test]
fn nothing_detected_falls_back_to_general() {
    let q = interpreter().interpret("merhaba, ne okusam bilmiyorum");
    assert_eq!(q.interest_tags, vec!["genel".to_string()]);
    assert_eq!(q.target_rank, None);
    assert!(q.excluded.is_empty());
}

#[test]
fn empty_fallback_label_leaves_no_interest() {
    let taxonomy = CategoryTaxonomy { fallback_label: String::new(), ..CategoryTaxonomy::default() };
    let q = QueryInterpreter::new(&taxonomy).expect("compile").interpret("merhaba");
    assert!(q.interest_tags.is_empty());
    assert_eq!(q.interest_text(), "");
}

#[test]
fn tags_follow_taxonomy_order() {
    let q = interpreter().interpret("turizm ve yazılım, biraz da hukuk");
    let tax = CategoryTaxonomy::default();
    let order: Vec<_> = tax.labels().filter(|l| q.interest_tags.iter().any(|t| t == l)).collect();
    assert_eq!(q.interest_tags, order);
    assert!(q.interest_tags.len() >= 3);
}

#[test]
fn extract_rank_alone() {
    let i = interpreter();
    assert_eq!(i.extract_rank("Sıralamam: 32k"), Some(32_000));
    assert_eq!(i.extract_rank("sıralamam 45,000"), None);
}
