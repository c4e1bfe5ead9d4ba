// src/noyau/jetons.rs

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::One;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Tok {
    Num(BigRational),
    Pi,
    E,

    Plus,
    Minus,
    Star,
    Slash,
    Caret, // ^ ou **

    // Moins unaire : produit par to_rpn, jamais par tokenize.
    Neg,

    LPar,
    RPar,
}

/// Seuls noms autorisés dans une expression.
const NOMS_AUTORISES: [&str; 2] = ["pi", "e"];

/// Tokenize une chaîne en jetons.
/// Supporte:
/// - entiers (ex: 12)
/// - décimaux exacts (ex: 0.625, .5, 3., 1e-3, 2.5E+2) -> Num(rationnel exact)
/// - opérateurs + - * / ^ et ** (puissance)
/// - parenthèses ( )
/// - π, pi, e (insensible à la casse)
pub fn tokenize(s: &str) -> Result<Vec<Tok>, String> {
    let mut out = Vec::new();
    let chars: Vec<char> = s.chars().collect();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        match c {
            '(' => {
                out.push(Tok::LPar);
                i += 1;
                continue;
            }
            ')' => {
                out.push(Tok::RPar);
                i += 1;
                continue;
            }
            '+' => {
                out.push(Tok::Plus);
                i += 1;
                continue;
            }
            '-' => {
                out.push(Tok::Minus);
                i += 1;
                continue;
            }
            '*' => {
                // ** : puissance
                if i + 1 < chars.len() && chars[i + 1] == '*' {
                    out.push(Tok::Caret);
                    i += 2;
                } else {
                    out.push(Tok::Star);
                    i += 1;
                }
                continue;
            }
            '/' => {
                out.push(Tok::Slash);
                i += 1;
                continue;
            }
            '^' => {
                out.push(Tok::Caret);
                i += 1;
                continue;
            }
            'π' => {
                out.push(Tok::Pi);
                i += 1;
                continue;
            }
            _ => {}
        }

        // Identifiants ASCII : liste blanche stricte (pi, e)
        if c.is_ascii_alphabetic() || c == '_' {
            let start = i;
            i += 1;
            while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            let word: String = chars[start..i].iter().collect();
            let w = word.to_lowercase();

            match w.as_str() {
                "pi" => out.push(Tok::Pi),
                "e" => out.push(Tok::E),
                _ => {
                    return Err(format!(
                        "nom non autorisé: '{word}' (seuls {} sont permis)",
                        NOMS_AUTORISES.join(", ")
                    ))
                }
            }
            continue;
        }

        if c.is_ascii_digit() || c == '.' {
            let (rat, suivant) = lire_nombre(&chars, i)?;
            out.push(Tok::Num(rat));
            i = suivant;
            continue;
        }

        return Err(format!("caractère inattendu: '{c}'"));
    }

    Ok(out)
}

/// Lit un littéral décimal à partir de `start` : chiffres [. chiffres] [e|E [+|-] chiffres].
/// Renvoie le rationnel exact et l’indice du premier caractère non lu.
///
/// Un « e » n’est un exposant que s’il est suivi d’un chiffre (éventuellement signé) :
/// sinon c’est la constante e (ex: « 2e » reste 2 puis e).
fn lire_nombre(chars: &[char], start: usize) -> Result<(BigRational, usize), String> {
    let mut i = start;
    let mut chiffres = String::new();

    while i < chars.len() && chars[i].is_ascii_digit() {
        chiffres.push(chars[i]);
        i += 1;
    }

    let mut decimales: usize = 0;
    if i < chars.len() && chars[i] == '.' {
        i += 1;
        while i < chars.len() && chars[i].is_ascii_digit() {
            chiffres.push(chars[i]);
            decimales += 1;
            i += 1;
        }
    }

    if chiffres.is_empty() {
        return Err("nombre invalide: '.' seul".into());
    }

    let mut exposant: i64 = 0;
    if i < chars.len() && (chars[i] == 'e' || chars[i] == 'E') {
        let mut j = i + 1;
        let mut negatif = false;
        if j < chars.len() && (chars[j] == '+' || chars[j] == '-') {
            negatif = chars[j] == '-';
            j += 1;
        }
        if j < chars.len() && chars[j].is_ascii_digit() {
            let debut = j;
            while j < chars.len() && chars[j].is_ascii_digit() {
                j += 1;
            }
            let txt: String = chars[debut..j].iter().collect();
            let v: i64 = txt
                .parse()
                .map_err(|_| format!("exposant décimal trop grand: {txt}"))?;
            if v > EXPOSANT_DECIMAL_MAX {
                return Err(format!("exposant décimal trop grand: {txt}"));
            }
            exposant = if negatif { -v } else { v };
            i = j;
        }
    }

    let n = BigInt::parse_bytes(chiffres.as_bytes(), 10).ok_or("nombre invalide")?;
    let puissance = exposant - decimales as i64;

    let rat = if puissance >= 0 {
        BigRational::from_integer(n * pow10(puissance as u32))
    } else {
        BigRational::new(n, pow10((-puissance) as u32))
    };

    Ok((rat, i))
}

/// Garde-fou : 1e100000 ferait un entier énorme.
const EXPOSANT_DECIMAL_MAX: i64 = 4096;

fn pow10(n: u32) -> BigInt {
    BigInt::from(10).pow(n)
}

/// Format utilitaire (debug) : liste de jetons en texte.
pub fn format_tokens(tokens: &[Tok]) -> String {
    fn format_rat(r: &BigRational) -> String {
        let n = r.numer();
        let d = r.denom();
        if d.is_one() {
            format!("{n}")
        } else {
            format!("{n}/{d}")
        }
    }

    let mut out = Vec::new();
    for t in tokens {
        let s = match t {
            Tok::Num(r) => format_rat(r),
            Tok::Pi => "π".to_string(),
            Tok::E => "e".to_string(),

            Tok::Plus => "+".to_string(),
            Tok::Minus => "-".to_string(),
            Tok::Star => "*".to_string(),
            Tok::Slash => "/".to_string(),
            Tok::Caret => "^".to_string(),
            Tok::Neg => "neg".to_string(),

            Tok::LPar => "(".to_string(),
            Tok::RPar => ")".to_string(),
        };
        out.push(s);
    }
    out.join(" ")
}
