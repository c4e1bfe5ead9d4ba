//! Tests scientifiques (campagne) : propriétés du développement sur des x aléatoires.
//!
//! But : vérifier les invariants sans faire chauffer la machine.
//! - RNG déterministe (seed fixe)
//! - tailles bornées (bits du dénominateur, n)
//! - budget temps global
//!
//! Propriétés :
//! - aller-retour exact quand l’arrêt est exact
//! - longueur ≤ n
//! - reste dans [0,1) à chaque étape, nul seulement à la dernière
//! - chaîne binaire alignée sur la somme partielle
//! - re-développer la somme partielle redonne les mêmes exposants
//! - erreur de troncature : 0 ≤ x − somme < 2^-(m_1+…+m_n)

use std::time::{Duration, Instant};

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};

use super::bits::{chaine_binaire, valeur_binaire};
use super::developpement::{developper, developper_avec_demarche, Arret};
use super::somme::somme_partielle;

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
    /// Entier aléatoire d’au plus `bits` bits.
    fn big(&mut self, bits: u32) -> BigInt {
        let mut v = BigInt::zero();
        let mut reste = bits;
        while reste > 0 {
            let k = reste.min(32);
            let mot = if k == 32 {
                self.next_u32()
            } else {
                self.next_u32() & ((1u32 << k) - 1)
            };
            v = (v << k) + mot;
            reste -= k;
        }
        v
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Générateurs de x ------------------------ */

/// x dyadique impair / 2^L dans ]0,1[ (développement fini, au plus L termes).
fn gen_dyadique(rng: &mut Rng) -> (BigRational, u64) {
    let l = 1 + rng.pick(160);
    let mut num = rng.big(l);
    if num.is_zero() {
        num = BigInt::one();
    }
    (BigRational::new(num, BigInt::one() << l), l as u64)
}

/// x = p/q avec q non puissance de 2 (développement infini).
fn gen_non_dyadique(rng: &mut Rng) -> BigRational {
    loop {
        let bits = 2 + rng.pick(200);
        let q = rng.big(bits) | BigInt::one(); // impair
        if q <= BigInt::one() {
            continue;
        }
        let p = rng.big(bits) % &q;
        if p.is_zero() {
            continue;
        }
        return BigRational::new(p, q);
    }
}

/* ------------------------ Propriétés ------------------------ */

#[test]
fn sci_aller_retour_dyadique() {
    let t0 = Instant::now();
    let max = Duration::from_secs(5);
    let mut rng = Rng::new(0x5eed_0001);

    for _ in 0..300 {
        let (x, l) = gen_dyadique(&mut rng);
        let d = developper(&x, l as usize + 1).unwrap();

        assert_eq!(d.arret(), Arret::Exact, "x={x}");
        assert!(d.tronque_avant_borne(), "x={x}");
        assert_eq!(somme_partielle(d.exposants()), x, "aller-retour x={x}");

        // le dernier bit à 1 est en position L exactement (numérateur réduit impair)
        let dernier = d.positions().last().copied().unwrap_or(0);
        assert_eq!(dernier, x.denom().bits() - 1, "x={x}");

        budget(t0, max);
    }
}

#[test]
fn sci_borne_et_troncature() {
    let t0 = Instant::now();
    let max = Duration::from_secs(5);
    let mut rng = Rng::new(0x5eed_0002);

    for _ in 0..200 {
        let x = gen_non_dyadique(&mut rng);
        let n = 1 + rng.pick(60) as usize;
        let d = developper(&x, n).unwrap();

        // jamais d’arrêt exact pour un dénominateur impair > 1
        assert_eq!(d.exposants().len(), n, "x={x}");
        assert_eq!(d.arret(), Arret::Borne, "x={x}");
        assert!(d.exposants().iter().all(|&m| m >= 1));

        // 0 < x − somme < 2^-(cumul)
        let s = somme_partielle(d.exposants());
        let cumul = d.positions().last().copied().unwrap_or(0);
        let ulp = BigRational::new(BigInt::one(), BigInt::one() << cumul);
        let ecart = &x - &s;
        assert!(ecart.is_positive(), "x={x}");
        assert!(ecart < ulp, "x={x}");

        budget(t0, max);
    }
}

#[test]
fn sci_reste_monotone() {
    let t0 = Instant::now();
    let max = Duration::from_secs(5);
    let mut rng = Rng::new(0x5eed_0003);
    let un = BigRational::one();

    for k in 0..200 {
        let x = if k % 2 == 0 {
            gen_dyadique(&mut rng).0
        } else {
            gen_non_dyadique(&mut rng)
        };
        let (d, etapes) = developper_avec_demarche(&x, 80).unwrap();
        assert_eq!(etapes.len(), d.exposants().len());

        for (i, e) in etapes.iter().enumerate() {
            assert!(!e.reste.is_negative() && e.reste < un, "x={x} étape {i}");
            // inverse > 1 et m = ⌈log2(inverse)⌉
            assert!(e.inverse > un);
            let deux_m = BigRational::from_integer(BigInt::one() << e.exposant);
            let deux_m_1 = BigRational::from_integer(BigInt::one() << (e.exposant - 1));
            assert!(deux_m >= e.inverse && deux_m_1 < e.inverse, "x={x} étape {i}");

            let dernier = i + 1 == etapes.len();
            if e.reste.is_zero() {
                assert!(dernier, "reste nul avant la fin, x={x}");
            }
        }

        budget(t0, max);
    }
}

#[test]
fn sci_alignement_des_bits() {
    let t0 = Instant::now();
    let max = Duration::from_secs(5);
    let mut rng = Rng::new(0x5eed_0004);

    for _ in 0..200 {
        let x = gen_non_dyadique(&mut rng);
        let n = 1 + rng.pick(40) as usize;
        let d = developper(&x, n).unwrap();

        let bits = chaine_binaire(d.exposants());
        assert_eq!(
            valeur_binaire(&bits).unwrap(),
            somme_partielle(d.exposants()),
            "x={x}"
        );
        // chaque position de d.positions() porte un '1', et seulement elles
        let uns: Vec<u64> = bits
            .char_indices()
            .filter(|(_, c)| *c == '1')
            .map(|(i, _)| i as u64 + 1)
            .collect();
        assert_eq!(uns, d.positions());

        budget(t0, max);
    }
}

#[test]
fn sci_redeveloppement_idempotent() {
    let t0 = Instant::now();
    let max = Duration::from_secs(5);
    let mut rng = Rng::new(0x5eed_0005);

    for k in 0..200 {
        let x = if k % 2 == 0 {
            gen_dyadique(&mut rng).0
        } else {
            gen_non_dyadique(&mut rng)
        };
        let n = 1 + rng.pick(50) as usize;
        let d = developper(&x, n).unwrap();
        let s = somme_partielle(d.exposants());

        let d2 = developper(&s, n).unwrap();
        assert_eq!(d2.exposants(), d.exposants(), "x={x} n={n}");
        assert_eq!(d2.arret(), Arret::Exact);

        budget(t0, max);
    }
}

/* ------------------------ Scénarios de référence ------------------------ */

#[test]
fn sci_scenarios_de_reference() {
    let r = |a: i64, b: i64| BigRational::new(BigInt::from(a), BigInt::from(b));

    let d = developper(&r(5, 8), 3).unwrap();
    assert_eq!(d.positions(), vec![1, 3]);
    assert_eq!(somme_partielle(d.exposants()), r(5, 8));
    assert_eq!(chaine_binaire(d.exposants()), "101");
    assert!(d.tronque_avant_borne());

    let d = developper(&r(1, 3), 4).unwrap();
    assert_eq!(d.positions(), vec![2, 4, 6, 8]);
    assert_eq!(somme_partielle(d.exposants()), r(85, 256));
    assert_eq!(chaine_binaire(d.exposants()), "01010101");

    let d = developper(&r(1, 2), 1).unwrap();
    assert_eq!(d.exposants(), &[1]);
    assert_eq!(somme_partielle(d.exposants()), r(1, 2));
    assert_eq!(chaine_binaire(d.exposants()), "1");
}

/* ------------------------ Stress contrôlé (sans brûler) ------------------------ */

#[test]
fn sci_stress_grands_denominateurs() {
    let t0 = Instant::now();
    let max = Duration::from_secs(5);

    // 1/3^k : dénominateur ~1.6·k bits, développement périodique
    for k in [10u32, 50, 100] {
        let q = BigInt::from(3).pow(k);
        let x = BigRational::new(BigInt::one(), q);
        let d = developper(&x, 256).unwrap();
        assert_eq!(d.exposants().len(), 256);
        let s = somme_partielle(d.exposants());
        assert!(s < x);
        budget(t0, max);
    }
}
