// src/noyau/erreur.rs
//
// Erreurs de validation (frontière unique du noyau).
// Le développement lui-même est total sur son domaine : toute erreur
// est détectée AVANT la boucle.

use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ErreurEntree {
    /// x illisible, ou hors de ]0,1[ après réduction à la partie fractionnaire.
    #[error("{0}")]
    RationnelInvalide(String),

    /// n n’est pas un entier ≥ 1.
    #[error("{0}")]
    BorneInvalide(String),
}

impl ErreurEntree {
    pub fn rationnel(msg: impl Into<String>) -> Self {
        Self::RationnelInvalide(msg.into())
    }

    pub fn borne(msg: impl Into<String>) -> Self {
        Self::BorneInvalide(msg.into())
    }
}
