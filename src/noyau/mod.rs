//! Noyau exact (développement binaire glouton)
//!
//! Organisation interne :
//! - developpement.rs : exposants gloutons (⌈log2⌉ par longueurs de bits)
//! - somme.rs         : somme partielle exacte
//! - bits.rs          : chaîne binaire 0.b1b2…
//! - erreur.rs        : erreurs de validation
//!
//! Coquille d’entrée (hors garantie d’exactitude pour π/e) :
//! - jetons.rs   : tokenisation
//! - rpn.rs      : shunting-yard + construction Expr
//! - expr.rs     : AST + évaluation exacte
//! - lecture.rs  : évaluation scalée (π, e) + cache
//! - approx.rs   : meilleure approximation rationnelle
//! - eval.rs     : pipeline de lecture de x et n

pub mod approx;
pub mod bits;
pub mod developpement;
pub mod erreur;
pub mod eval;
pub mod expr;
pub mod jetons;
pub mod lecture;
pub mod rpn;
pub mod somme;

#[cfg(test)]
mod tests_scientifiques;

// API publique minimale
pub use bits::chaine_binaire;
pub use developpement::{developper, developper_avec_demarche, Arret, Developpement, Etape};
pub use erreur::ErreurEntree;
pub use eval::{lire_n, lire_x, LectureX};
pub use somme::somme_partielle;
