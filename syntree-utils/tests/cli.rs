use assert_cmd::Command;
use predicates::prelude::*;

static TREES: &str = "(ROOT (S (PPER Er) (VAFIN hat) (PTKNEG nicht) \
(VP (NP (ART das) (NN Buch)) (VVPP gelesen)) ($. .)))
(ROOT (S (ADV Morgen) (VVFIN rufe) (PPER ich) (PPER dich) (PTKVZ an) ($. .)))
";

fn reorder() -> Command {
    Command::cargo_bin("reorder-trees").unwrap()
}

#[test]
fn reorders_sentences() {
    reorder()
        .write_stdin(TREES)
        .assert()
        .success()
        .stdout("Er hat nicht gelesen das Buch . \nMorgen ich an rufe dich . \n");
}

#[test]
fn writes_trees() {
    reorder()
        .arg("--trees")
        .arg("--rules")
        .arg("subject,particles")
        .write_stdin(TREES)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "(ROOT (S (ADV Morgen) (PPER ich) (PTKVZ an) (VVFIN rufe) (PPER dich) ($. .)))",
        ));
}

#[test]
fn rejects_unknown_rule() {
    reorder()
        .arg("--rules")
        .arg("verb-final")
        .write_stdin(TREES)
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown rule"));
}

#[test]
fn fails_on_malformed_input() {
    reorder()
        .write_stdin("(ROOT (S (PPER Er)")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot read tree 1"));
}

#[test]
fn reads_bracket_tags() {
    reorder()
        .write_stdin(
            "(ROOT (S (PPER Er) (VVFIN lacht) ($( -) (ADV laut)))\n\
             (ROOT (S (PPER Sie) (VVFIN lacht)))\n",
        )
        .assert()
        .success()
        .stdout("Er lacht - laut \nSie lacht \n");
}

#[test]
fn keeps_trees_that_are_too_deep() {
    reorder()
        .arg("--max-depth")
        .arg("2")
        .write_stdin(TREES)
        .assert()
        .success()
        .stdout("Er hat nicht das Buch gelesen . \nMorgen rufe ich dich an . \n")
        .stderr(predicate::str::contains("exceeds the maximum depth"));
}
