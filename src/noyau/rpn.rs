// src/noyau/rpn.rs
//
// Shunting-yard -> RPN -> AST
// Objectif:
// - Convertir une suite de Tok en RPN (postfix)
// - Puis reconstruire Expr
//
// Règles:
// - Moins unaire : si '-' arrive quand on n’attend PAS une valeur, on empile Neg.
//   Neg lie plus fort que * et /, moins fort que ^ (-2^2 = -4).
// - Plus unaire : ignoré.
// - ^ est associatif à droite, et son opérande droit peut être un Neg (2^-1).

use num_bigint::BigInt;
use num_traits::{One, ToPrimitive};

use super::expr::Expr;
use super::jetons::Tok;

/// Garde-fou : exposant entier maximal accepté pour ^.
pub const EXPOSANT_MAX: i64 = 4096;

fn precedence(t: &Tok) -> i32 {
    match t {
        Tok::Plus | Tok::Minus => 1,
        Tok::Star | Tok::Slash => 2,
        Tok::Neg => 3,
        Tok::Caret => 4,
        _ => 0,
    }
}

fn is_right_associative(t: &Tok) -> bool {
    matches!(t, Tok::Caret | Tok::Neg)
}

/// Convertit une suite de jetons en RPN (notation polonaise inversée).
///
/// Exemple:
///   tokens: [Minus, Num(2), Caret, Num(2)]
///   rpn:    [Num(2), Num(2), Caret, Neg]
pub fn to_rpn(tokens: &[Tok]) -> Result<Vec<Tok>, String> {
    let mut out: Vec<Tok> = Vec::new();
    let mut ops: Vec<Tok> = Vec::new();

    // “valeur” = un atome ou une expression fermée.
    // Sert à détecter les signes unaires.
    let mut prev_was_value = false;

    for tok in tokens.iter().cloned() {
        match tok {
            Tok::Num(_) | Tok::Pi | Tok::E => {
                if prev_was_value {
                    return Err("opérateur manquant entre deux valeurs".into());
                }
                out.push(tok);
                prev_was_value = true;
            }

            Tok::LPar => {
                if prev_was_value {
                    return Err("opérateur manquant avant '('".into());
                }
                ops.push(tok);
                prev_was_value = false;
            }

            Tok::RPar => {
                if !prev_was_value {
                    return Err("expression vide avant ')'".into());
                }
                // dépile jusqu’à '('
                let mut ouverte = false;
                while let Some(top) = ops.pop() {
                    if matches!(top, Tok::LPar) {
                        ouverte = true;
                        break;
                    }
                    out.push(top);
                }
                if !ouverte {
                    return Err("parenthèse fermante sans ouvrante".into());
                }
                prev_was_value = true;
            }

            Tok::Plus | Tok::Minus if !prev_was_value => {
                // signe unaire : + ignoré, - devient Neg (ne dépile rien)
                if matches!(tok, Tok::Minus) {
                    ops.push(Tok::Neg);
                }
            }

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash | Tok::Caret => {
                if !prev_was_value {
                    return Err(format!(
                        "opérande manquant avant '{}'",
                        super::jetons::format_tokens(std::slice::from_ref(&tok))
                    ));
                }

                // dépile tant que la précédence/associativité l’exige
                while let Some(top) = ops.last() {
                    if matches!(top, Tok::LPar) {
                        break;
                    }

                    let p_top = precedence(top);
                    let p_tok = precedence(&tok);

                    let doit_pop = if is_right_associative(&tok) {
                        p_top > p_tok
                    } else {
                        p_top >= p_tok
                    };

                    if !doit_pop {
                        break;
                    }
                    if let Some(op) = ops.pop() {
                        out.push(op);
                    }
                }

                ops.push(tok);
                prev_was_value = false;
            }

            Tok::Neg => return Err("jeton Neg inattendu en entrée".into()),
        }
    }

    if !prev_was_value {
        return Err("expression incomplète".into());
    }

    // vide la pile ops
    while let Some(op) = ops.pop() {
        if matches!(op, Tok::LPar) {
            return Err("parenthèses non fermées".into());
        }
        out.push(op);
    }

    Ok(out)
}

/// Construit une Expr à partir d’une RPN.
///
/// L’exposant de ^ doit s’évaluer (exactement) en un entier de |k| ≤ EXPOSANT_MAX.
pub fn from_rpn(rpn: &[Tok]) -> Result<Expr, String> {
    let mut st: Vec<Expr> = Vec::new();

    for tok in rpn.iter().cloned() {
        match tok {
            Tok::Num(r) => st.push(Expr::Rat(r)),
            Tok::Pi => st.push(Expr::Pi),
            Tok::E => st.push(Expr::E),

            Tok::Neg => {
                let x = st.pop().ok_or("expression invalide")?;
                st.push(Expr::Neg(Box::new(x)));
            }

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash | Tok::Caret => {
                let b = st.pop().ok_or("expression invalide")?;
                let a = st.pop().ok_or("expression invalide")?;

                let e = match tok {
                    Tok::Plus => Expr::Add(Box::new(a), Box::new(b)),
                    Tok::Minus => Expr::Sub(Box::new(a), Box::new(b)),
                    Tok::Star => Expr::Mul(Box::new(a), Box::new(b)),
                    Tok::Slash => Expr::Div(Box::new(a), Box::new(b)),
                    _ => Expr::PowInt(Box::new(a), exposant_entier(&b)?),
                };

                st.push(e);
            }

            Tok::LPar | Tok::RPar => return Err("parenthèse inattendue en RPN".into()),
        }
    }

    if st.len() != 1 {
        return Err("expression invalide".into());
    }
    st.pop().ok_or_else(|| "expression invalide".into())
}

/// Exposant de ^ : doit être un entier exact (pas de π/e), borné.
fn exposant_entier(b: &Expr) -> Result<i64, String> {
    if b.contient_constante() {
        return Err("exposant doit être entier".into());
    }
    let r = b.eval_exacte()?;
    if !r.denom().is_one() {
        return Err("exposant doit être entier".into());
    }
    let k = big_to_i64(r.numer()).ok_or("exposant trop grand")?;
    // i64::MIN n’a pas de valeur absolue signée
    if k.unsigned_abs() > EXPOSANT_MAX.unsigned_abs() {
        return Err("exposant trop grand".into());
    }
    Ok(k)
}

/// Conversion SAFE vers i64.
fn big_to_i64(x: &BigInt) -> Option<i64> {
    x.to_i64()
}
