use arabic_conjugator::example_verbs::bundled_examples;
use arabic_conjugator::{
    conjugate, decompose, ConjugationError, ConjugationRequest, Mood, Pronoun, Tense,
};
use pretty_assertions::assert_eq;

#[test]
fn past_of_the_model_verb() {
    let table = conjugate("فَعَلَ", &ConjugationRequest::past()).unwrap();
    assert_eq!(table.tense(), Tense::Past);
    assert_eq!(table.len(), 13);
    assert_eq!(table.get(Pronoun::ThirdSingularMasc).unwrap().logical_text(), "فَعَلَ");
    assert_eq!(table.get(Pronoun::FirstSingular).unwrap().logical_text(), "فَعَلْتُ");
    assert_eq!(table.get(Pronoun::ThirdPluralFem).unwrap().logical_text(), "فَعَلْنَ");
}

#[test]
fn present_indicative_is_not_subjunctive() {
    let indicative = conjugate("فَعَلَ", &ConjugationRequest::present(Mood::Indicative, 1)).unwrap();
    let subjunctive = conjugate("فَعَلَ", &ConjugationRequest::present(Mood::Subjunctive, 1)).unwrap();
    let second_masc = |t: &arabic_conjugator::ConjugationTable| {
        t.get(Pronoun::SecondSingularMasc).unwrap().logical_text().to_string()
    };
    assert_eq!(second_masc(&indicative), "تَفْعَلُ");
    assert_eq!(second_masc(&subjunctive), "تَفْعَلَ");
}

#[test]
fn every_root_yields_the_same_thirteen_cells_in_order() {
    for example in bundled_examples().unwrap() {
        let request = ConjugationRequest::present(Mood::Indicative, example.bab);
        for request in [ConjugationRequest::past(), request] {
            let table = conjugate(&example.text, &request).unwrap();
            let pronouns: Vec<Pronoun> = table.forms().iter().map(|f| f.pronoun()).collect();
            assert_eq!(pronouns, Pronoun::ALL.to_vec(), "{}", example.text);
        }
    }
}

#[test]
fn examples_round_trip_through_decomposition() {
    for example in bundled_examples().unwrap() {
        assert_eq!(decompose(&example.text).unwrap().canonical_form(), example.text);
    }
}

#[test]
fn unusable_requests_fail_without_a_table() {
    assert_eq!(
        conjugate("فَعَلَ", &ConjugationRequest::present(Mood::Jussive, 1)).unwrap_err(),
        ConjugationError::UnsupportedMood(Mood::Jussive)
    );
    for pattern in [0, 7] {
        assert_eq!(
            conjugate("فَعَلَ", &ConjugationRequest::present(Mood::Indicative, pattern)).unwrap_err(),
            ConjugationError::InvalidPattern(pattern)
        );
    }
    for bad in ["", "فعل", "فَعَ", "فَعْلَلَ", "abc"] {
        assert!(matches!(
            conjugate(bad, &ConjugationRequest::past()),
            Err(ConjugationError::InvalidRoot(_))
        ));
    }
}
