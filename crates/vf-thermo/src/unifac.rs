//! Dortmund modified UNIFAC activity coefficient model.
//!
//! Group interaction: `Ψ_nm = exp(-(a_nm + b_nm·T + c_nm·T²) / T)`.
//! Combinatorial part uses the 3/4 exponent on the volume fractions.

use crate::component::Component;
use crate::error::{ThermoError, ThermoResult};

/// UNIFAC subgroup with its van der Waals volume `r` and surface `q`.
#[derive(Debug, Clone, PartialEq)]
pub struct Subgroup {
    pub name: String,
    pub main_group: String,
    pub r: f64,
    pub q: f64,
}

impl Subgroup {
    pub fn new(name: &str, main_group: &str, r: f64, q: f64) -> Self {
        Self {
            name: name.to_string(),
            main_group: main_group.to_string(),
            r,
            q,
        }
    }
}

/// Interaction parameters from main group `from` to main group `to`.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupInteraction {
    pub from: String,
    pub to: String,
    /// [K]
    pub a: f64,
    pub b: f64,
    /// [1/K]
    pub c: f64,
}

impl GroupInteraction {
    pub fn new(from: &str, to: &str, a: f64, b: f64, c: f64) -> Self {
        Self {
            from: from.to_string(),
            to: to.to_string(),
            a,
            b,
            c,
        }
    }
}

/// Subgroup and interaction tables.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UnifacParameters {
    subgroups: Vec<Subgroup>,
    interactions: Vec<GroupInteraction>,
}

impl UnifacParameters {
    /// Empty table; populate with [`Self::with_subgroup`] and [`Self::with_interaction`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Published Dortmund parameters for the alkane, olefinic and aromatic
    /// carbon main groups.
    pub fn dortmund() -> Self {
        Self::new()
            .with_subgroup(Subgroup::new("CH3", "CH2", 0.6325, 1.0608))
            .with_subgroup(Subgroup::new("CH2", "CH2", 0.6325, 0.7081))
            .with_subgroup(Subgroup::new("CH", "CH2", 0.6325, 0.3554))
            .with_subgroup(Subgroup::new("C", "CH2", 0.6325, 0.0))
            .with_subgroup(Subgroup::new("CH2=CH", "C=C", 1.2832, 1.6016))
            .with_subgroup(Subgroup::new("CH=CH", "C=C", 1.2832, 1.2489))
            .with_subgroup(Subgroup::new("CH2=C", "C=C", 1.2832, 1.2489))
            .with_subgroup(Subgroup::new("CH=C", "C=C", 1.2832, 0.8962))
            .with_subgroup(Subgroup::new("C=C", "C=C", 1.2832, 0.4582))
            .with_subgroup(Subgroup::new("ACH", "ACH", 0.3763, 0.4321))
            .with_subgroup(Subgroup::new("AC", "ACH", 0.3763, 0.2113))
            .with_interaction(GroupInteraction::new("CH2", "C=C", 189.66, -0.2723, 0.0))
            .with_interaction(GroupInteraction::new("C=C", "CH2", -95.418, 0.06171, 0.0))
            .with_interaction(GroupInteraction::new("CH2", "ACH", 114.2, 0.0933, 0.0))
            .with_interaction(GroupInteraction::new("ACH", "CH2", 16.07, -0.2998, 0.0))
    }

    /// Add or replace a subgroup.
    pub fn with_subgroup(mut self, subgroup: Subgroup) -> Self {
        match self.subgroups.iter_mut().find(|s| s.name == subgroup.name) {
            Some(existing) => *existing = subgroup,
            None => self.subgroups.push(subgroup),
        }
        self
    }

    /// Add or replace a directed main-group interaction.
    pub fn with_interaction(mut self, interaction: GroupInteraction) -> Self {
        match self
            .interactions
            .iter_mut()
            .find(|i| i.from == interaction.from && i.to == interaction.to)
        {
            Some(existing) => *existing = interaction,
            None => self.interactions.push(interaction),
        }
        self
    }

    pub fn subgroup(&self, name: &str) -> Option<&Subgroup> {
        self.subgroups.iter().find(|s| s.name == name)
    }

    pub fn interaction(&self, from: &str, to: &str) -> Option<&GroupInteraction> {
        self.interactions
            .iter()
            .find(|i| i.from == from && i.to == to)
    }
}

/// UNIFAC model resolved for a fixed list of components.
#[derive(Debug, Clone)]
pub struct Unifac {
    /// Subgroup occurrences per component: `nu[i][k]`.
    nu: Vec<Vec<f64>>,
    group_q: Vec<f64>,
    /// Main-group index of each subgroup.
    main_of: Vec<usize>,
    /// `(a, b, c)` between main groups.
    coeffs: Vec<Vec<(f64, f64, f64)>>,
    /// Component volume parameters `r_i = Σ ν_ki R_k`.
    r: Vec<f64>,
    /// Component surface parameters `q_i = Σ ν_ki Q_k`.
    q: Vec<f64>,
    /// Group mole fractions in each pure component.
    pure_group_x: Vec<Vec<f64>>,
}

impl Unifac {
    pub fn new(components: &[Component], params: &UnifacParameters) -> ThermoResult<Self> {
        let mut names: Vec<&str> = Vec::new();
        for comp in components {
            if comp.groups.is_empty() {
                return Err(ThermoError::InvalidArg {
                    what: "component has no UNIFAC groups",
                });
            }
            for (g, _) in &comp.groups {
                if !names.contains(&g.as_str()) {
                    names.push(g);
                }
            }
        }

        let mut subgroups = Vec::with_capacity(names.len());
        for name in &names {
            let sg = params
                .subgroup(name)
                .ok_or_else(|| ThermoError::UnknownGroup {
                    name: name.to_string(),
                })?;
            subgroups.push(sg);
        }

        let mut mains: Vec<&str> = Vec::new();
        let main_of: Vec<usize> = subgroups
            .iter()
            .map(|sg| match mains.iter().position(|m| *m == sg.main_group) {
                Some(idx) => idx,
                None => {
                    mains.push(&sg.main_group);
                    mains.len() - 1
                }
            })
            .collect();

        let mut coeffs = vec![vec![(0.0, 0.0, 0.0); mains.len()]; mains.len()];
        for (m, from) in mains.iter().enumerate() {
            for (n, to) in mains.iter().enumerate() {
                if m == n {
                    continue;
                }
                let gi = params
                    .interaction(from, to)
                    .ok_or_else(|| ThermoError::MissingInteraction {
                        first: from.to_string(),
                        second: to.to_string(),
                    })?;
                coeffs[m][n] = (gi.a, gi.b, gi.c);
            }
        }

        let nu: Vec<Vec<f64>> = components
            .iter()
            .map(|comp| {
                names
                    .iter()
                    .map(|name| {
                        comp.groups
                            .iter()
                            .filter(|(g, _)| g.as_str() == *name)
                            .map(|(_, n)| *n as f64)
                            .sum()
                    })
                    .collect()
            })
            .collect();

        let group_r: Vec<f64> = subgroups.iter().map(|s| s.r).collect();
        let group_q: Vec<f64> = subgroups.iter().map(|s| s.q).collect();
        let r = nu.iter().map(|row| dot(row, &group_r)).collect();
        let q = nu.iter().map(|row| dot(row, &group_q)).collect();
        let pure_group_x = nu
            .iter()
            .map(|row| {
                let total: f64 = row.iter().sum();
                row.iter().map(|v| v / total).collect()
            })
            .collect();

        Ok(Self {
            nu,
            group_q,
            main_of,
            coeffs,
            r,
            q,
            pure_group_x,
        })
    }

    pub fn n_components(&self) -> usize {
        self.nu.len()
    }

    /// Natural log of the activity coefficients at liquid composition `x`.
    pub fn ln_gamma(&self, x: &[f64], t_k: f64) -> ThermoResult<Vec<f64>> {
        let n = self.n_components();
        if x.len() != n {
            return Err(ThermoError::LengthMismatch {
                what: "UNIFAC composition",
                expected: n,
                got: x.len(),
            });
        }
        if !t_k.is_finite() || t_k <= 0.0 {
            return Err(ThermoError::NonPhysical {
                what: "UNIFAC temperature",
            });
        }

        let comb = self.combinatorial(x);

        let psi = self.psi(t_k);
        let mut group_x = vec![0.0; self.group_q.len()];
        for (xi, row) in x.iter().zip(&self.nu) {
            for (gx, nu_ki) in group_x.iter_mut().zip(row) {
                *gx += xi * nu_ki;
            }
        }
        let total: f64 = group_x.iter().sum();
        group_x.iter_mut().for_each(|v| *v /= total);
        let ln_big_gamma = self.group_ln_gamma(&group_x, &psi);

        let ln_gamma = (0..n)
            .map(|i| {
                let ln_pure = self.group_ln_gamma(&self.pure_group_x[i], &psi);
                let residual: f64 = self.nu[i]
                    .iter()
                    .zip(ln_big_gamma.iter().zip(&ln_pure))
                    .map(|(nu_ki, (lg, lp))| nu_ki * (lg - lp))
                    .sum();
                comb[i] + residual
            })
            .collect();
        Ok(ln_gamma)
    }

    /// Dimensionless excess Gibbs energy `G^E/RT = Σ x_i ln γ_i`.
    pub fn excess_gibbs(&self, x: &[f64], t_k: f64) -> ThermoResult<f64> {
        let ln_gamma = self.ln_gamma(x, t_k)?;
        Ok(dot(x, &ln_gamma))
    }

    fn combinatorial(&self, x: &[f64]) -> Vec<f64> {
        let r34: Vec<f64> = self.r.iter().map(|r| r.powf(0.75)).collect();
        let sum_r34 = dot(x, &r34);
        let sum_r = dot(x, &self.r);
        let sum_q = dot(x, &self.q);

        (0..self.n_components())
            .map(|i| {
                let v_mod = r34[i] / sum_r34;
                let v = self.r[i] / sum_r;
                let f = self.q[i] / sum_q;
                1.0 - v_mod + v_mod.ln() - 5.0 * self.q[i] * (1.0 - v / f + (v / f).ln())
            })
            .collect()
    }

    fn psi(&self, t_k: f64) -> Vec<Vec<f64>> {
        let ng = self.group_q.len();
        let mut psi = vec![vec![1.0; ng]; ng];
        for (m, row) in psi.iter_mut().enumerate() {
            for (n, value) in row.iter_mut().enumerate() {
                let (a, b, c) = self.coeffs[self.main_of[m]][self.main_of[n]];
                *value = (-(a + b * t_k + c * t_k * t_k) / t_k).exp();
            }
        }
        psi
    }

    fn group_ln_gamma(&self, group_x: &[f64], psi: &[Vec<f64>]) -> Vec<f64> {
        let ng = self.group_q.len();
        let qx: f64 = dot(&self.group_q, group_x);
        let theta: Vec<f64> = (0..ng)
            .map(|m| self.group_q[m] * group_x[m] / qx)
            .collect();
        // s[k] = Σ_m θ_m Ψ_mk
        let s: Vec<f64> = (0..ng)
            .map(|k| (0..ng).map(|m| theta[m] * psi[m][k]).sum())
            .collect();

        (0..ng)
            .map(|k| {
                let tail: f64 = (0..ng).map(|m| theta[m] * psi[k][m] / s[m]).sum();
                self.group_q[k] * (1.0 - s[k].ln() - tail)
            })
            .collect()
    }
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}
