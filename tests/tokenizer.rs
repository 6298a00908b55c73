use rand::distributions::Slice;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::WeightedIndex;
use texmath_parser::{lex, TokenKind, Tokenizer};

const DIGITS: [char; 11] = ['0', '1', '2', '3', '4', '5', '6', '7', '8', '9', '.'];
const LETTERS: [char; 5] = ['a', 'x', 'y', 'z', 't'];
const MARKERS: [char; 7] = ['+', '-', '_', '^', '(', ')', '\\'];

fn random_string(rng: &mut impl Rng, extra: &[char]) -> String {
    let digit = Slice::new(&DIGITS).unwrap();
    let letter = Slice::new(&LETTERS).unwrap();
    let marker = Slice::new(&MARKERS).unwrap();
    let choice = WeightedIndex::new([3, 3, 2, if extra.is_empty() { 0 } else { 1 }]).unwrap();

    let mut res = String::new();
    for _ in 0..40 {
        match rng.sample(&choice) {
            0 => res.push(*rng.sample(&digit)),
            1 => res.push(*rng.sample(&letter)),
            2 => res.push(*rng.sample(&marker)),
            3 => res.push(extra[rng.gen_range(0..extra.len())]),
            _ => unreachable!(),
        }
    }
    res
}

#[test]
fn tokens_cover_input() {
    let mut rng = StdRng::from_seed([0; 32]);
    for _ in 0..50 {
        let string = random_string(&mut rng, &[]);
        let tokens = lex(&string);
        let joined: String = tokens.iter().map(|tok| tok.text).collect();
        assert_eq!(joined, string);
        let mut end = 0;
        for tok in &tokens {
            assert_eq!(tok.start, end, "gap before {tok:?} in {string:?}");
            assert!(tok.start < tok.end);
            end = tok.end;
        }
    }
}

#[test]
fn offsets_slice_input() {
    let mut rng = StdRng::from_seed([1; 32]);
    for _ in 0..50 {
        let string = random_string(&mut rng, &[' ', '{', '}', 'Q', '*']);
        let mut last_end = 0;
        for tok in Tokenizer::new(&string) {
            assert_eq!(tok.text, &string[tok.start..tok.end]);
            assert!(tok.start >= last_end, "overlap at {tok:?} in {string:?}");
            let structural = matches!(
                tok.kind,
                TokenKind::CommandArgStart | TokenKind::CommandArgEnd
            );
            assert!(structural || !tok.text.is_empty());
            last_end = tok.end;
        }
    }
}

#[test]
fn fused() {
    let mut tokens = Tokenizer::new("x+\\cdo");
    assert_eq!(tokens.by_ref().count(), 3);
    assert_eq!(tokens.next(), None);
    assert_eq!(tokens.next(), None);
}

#[test]
fn commands_and_args() {
    let tokens = lex("\\sqrt 2\\cdot 3");
    let commands: Vec<_> = tokens
        .iter()
        .filter(|tok| tok.kind == TokenKind::Command)
        .map(|tok| tok.text)
        .collect();
    assert_eq!(commands, ["\\sqrt", "\\cdot"]);

    let tokens = lex("\\frac{x+1}{.5}");
    let args: Vec<_> = tokens
        .iter()
        .filter(|tok| tok.kind == TokenKind::Arg)
        .map(|tok| tok.text)
        .collect();
    assert_eq!(args, ["x+1", ".5"]);
}
