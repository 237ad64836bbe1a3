//! Backtracking version solver.
//!
//! Depth-first search over a worklist of `(parent, requirement)` pairs.
//! Candidate versions are enumerated highest-first and the first branch
//! that empties its worklist wins, so the produced lock is deterministic
//! and name-wise maximal.

use std::collections::VecDeque;

use crate::errors::UserError;
use crate::index::Index;
use crate::package::{Dependency, Lock, Package};

pub struct Solver<'a> {
    index: &'a Index,
}

impl<'a> Solver<'a> {
    pub fn new(index: &'a Index) -> Self {
        Self { index }
    }

    /// Produce a lock covering the transitive closure of `package`'s
    /// dependencies, or `NoSolution` if no assignment satisfies every
    /// requirement. The root package itself is never pinned; a transitive
    /// requirement naming the root is taken as satisfied by the root's own
    /// version.
    pub fn solve(&self, package: &Package) -> Result<Lock, UserError> {
        let worklist: VecDeque<(String, Dependency)> = package
            .dependencies
            .iter()
            .map(|dependency| (package.info.name.clone(), dependency.clone()))
            .collect();
        self.solve_branch(&package.info.name, worklist, Lock::new())?
            .ok_or(UserError::NoSolution)
    }

    fn solve_branch(
        &self,
        root: &str,
        mut worklist: VecDeque<(String, Dependency)>,
        lock: Lock,
    ) -> Result<Option<Lock>, UserError> {
        let Some((parent, dependency)) = worklist.pop_front() else {
            return Ok(Some(lock));
        };

        if dependency.name == root {
            return self.solve_branch(root, worklist, lock);
        }

        // Commitment: once a name is pinned, every later requirement either
        // accepts the pin or fails the branch.
        if let Some(pin) = lock.get(&dependency.name) {
            if dependency.is_satisfied_by(pin.version) {
                return self.solve_branch(root, worklist, lock);
            }
            return Ok(None);
        }

        for candidate in self.candidates(&dependency)? {
            if !dependency.is_satisfied_by(candidate.info.version) {
                continue;
            }
            let next_lock = lock.clone_add(candidate.to_pin(), &parent, &self.index.name);
            let mut next_worklist = worklist.clone();
            for transitive in candidate.dependencies.iter() {
                next_worklist.push_back((candidate.info.name.clone(), transitive.clone()));
            }
            if let Some(solution) = self.solve_branch(root, next_worklist, next_lock)? {
                return Ok(Some(solution));
            }
        }
        Ok(None)
    }

    fn candidates(&self, dependency: &Dependency) -> Result<Vec<&Package>, UserError> {
        match self.index.list_versions_sorted(&dependency.name) {
            Ok(packages) => Ok(packages),
            Err(UserError::PackageNotFound { .. }) => Err(UserError::DependencyNotFound {
                name: dependency.name.clone(),
                index: self.index.name.clone(),
            }),
            Err(err) => Err(err),
        }
    }
}
