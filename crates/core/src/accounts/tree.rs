//! In-memory chart of accounts with hierarchy validation.

use std::collections::HashMap;

use kontor_shared::types::AccountId;

use super::error::AccountError;
use super::types::{Account, AccountRef};

/// The chart of accounts as a validated tree.
///
/// Maintains the id and code indexes plus the parent/child adjacency so
/// roll-up queries never have to rescan the whole chart. All structural
/// rules (unique codes, matching groups, no cycles) are enforced here.
#[derive(Debug, Clone, Default)]
pub struct AccountTree {
    accounts: HashMap<AccountId, Account>,
    codes: HashMap<String, AccountId>,
    children: HashMap<AccountId, Vec<AccountId>>,
}

impl AccountTree {
    /// Creates an empty chart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of accounts in the chart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Returns true if the chart has no accounts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Adds an account to the chart.
    ///
    /// # Errors
    ///
    /// Returns an error if the code is already taken, the parent does not
    /// exist, or the parent belongs to a different group.
    pub fn insert(&mut self, account: Account) -> Result<(), AccountError> {
        if let Some(code) = &account.code {
            if let Some(existing) = self.codes.get(code) {
                if *existing != account.id {
                    return Err(AccountError::DuplicateCode(code.clone()));
                }
            }
        }

        if let Some(parent_id) = account.parent_id {
            let parent = self
                .accounts
                .get(&parent_id)
                .ok_or(AccountError::ParentNotFound(parent_id))?;
            if parent.group != account.group {
                return Err(AccountError::GroupMismatch {
                    child_group: account.group.to_string(),
                    parent_group: parent.group.to_string(),
                });
            }
            self.children.entry(parent_id).or_default().push(account.id);
        }

        if let Some(code) = &account.code {
            self.codes.insert(code.clone(), account.id);
        }
        self.accounts.insert(account.id, account);
        Ok(())
    }

    /// Looks up an account by id.
    #[must_use]
    pub fn get(&self, id: AccountId) -> Option<&Account> {
        self.accounts.get(&id)
    }

    /// Looks up an account by its chart code.
    #[must_use]
    pub fn get_by_code(&self, code: &str) -> Option<&Account> {
        self.codes.get(code).and_then(|id| self.accounts.get(id))
    }

    /// Resolves an account reference to the account it names.
    ///
    /// # Errors
    ///
    /// Returns an error if no account matches the reference.
    pub fn resolve(&self, account_ref: &AccountRef) -> Result<&Account, AccountError> {
        match account_ref {
            AccountRef::ById(id) => self.get(*id).ok_or(AccountError::NotFound(*id)),
            AccountRef::ByCode(code) => self
                .get_by_code(code)
                .ok_or_else(|| AccountError::CodeNotFound(code.clone())),
        }
    }

    /// Moves an account under a new parent (or to the root when `None`).
    ///
    /// # Errors
    ///
    /// Returns an error if either account is missing, the groups differ,
    /// or the move would make the account its own ancestor.
    pub fn set_parent(
        &mut self,
        id: AccountId,
        new_parent: Option<AccountId>,
    ) -> Result<(), AccountError> {
        let group = self
            .accounts
            .get(&id)
            .ok_or(AccountError::NotFound(id))?
            .group;

        if let Some(parent_id) = new_parent {
            let parent = self
                .accounts
                .get(&parent_id)
                .ok_or(AccountError::ParentNotFound(parent_id))?;
            if parent.group != group {
                return Err(AccountError::GroupMismatch {
                    child_group: group.to_string(),
                    parent_group: parent.group.to_string(),
                });
            }
            // Walking up from the new parent must never reach the account
            // being moved, otherwise the chart would loop.
            let mut cursor = Some(parent_id);
            while let Some(current) = cursor {
                if current == id {
                    return Err(AccountError::CycleDetected {
                        account_id: id,
                        parent_id,
                    });
                }
                cursor = self.accounts.get(&current).and_then(|a| a.parent_id);
            }
        }

        let old_parent = self.accounts.get(&id).and_then(|a| a.parent_id);
        if let Some(old) = old_parent {
            if let Some(siblings) = self.children.get_mut(&old) {
                siblings.retain(|child| *child != id);
            }
        }
        if let Some(parent_id) = new_parent {
            self.children.entry(parent_id).or_default().push(id);
        }
        if let Some(account) = self.accounts.get_mut(&id) {
            account.parent_id = new_parent;
        }
        Ok(())
    }

    /// Archives an account so it stops accepting postings.
    ///
    /// # Errors
    ///
    /// Returns an error if the account is missing or still has active children.
    pub fn archive(&mut self, id: AccountId) -> Result<(), AccountError> {
        if !self.accounts.contains_key(&id) {
            return Err(AccountError::NotFound(id));
        }
        let has_active_children = self
            .children_of(id)
            .iter()
            .filter_map(|child| self.accounts.get(child))
            .any(|child| !child.archived);
        if has_active_children {
            return Err(AccountError::HasActiveChildren(id));
        }
        if let Some(account) = self.accounts.get_mut(&id) {
            account.archived = true;
        }
        Ok(())
    }

    /// Restores an archived account.
    ///
    /// # Errors
    ///
    /// Returns an error if the account is missing.
    pub fn unarchive(&mut self, id: AccountId) -> Result<(), AccountError> {
        let account = self
            .accounts
            .get_mut(&id)
            .ok_or(AccountError::NotFound(id))?;
        account.archived = false;
        Ok(())
    }

    /// Direct children of an account.
    #[must_use]
    pub fn children_of(&self, id: AccountId) -> &[AccountId] {
        self.children.get(&id).map_or(&[], Vec::as_slice)
    }

    /// All descendants of an account, depth-first, excluding the account itself.
    #[must_use]
    pub fn descendants_of(&self, id: AccountId) -> Vec<AccountId> {
        let mut result = Vec::new();
        let mut stack: Vec<AccountId> = self.children_of(id).to_vec();
        while let Some(current) = stack.pop() {
            result.push(current);
            stack.extend_from_slice(self.children_of(current));
        }
        result
    }

    /// Accounts with no parent.
    #[must_use]
    pub fn roots(&self) -> Vec<&Account> {
        let mut roots: Vec<&Account> = self
            .accounts
            .values()
            .filter(|a| a.parent_id.is_none())
            .collect();
        roots.sort_by(|a, b| a.code.cmp(&b.code).then_with(|| a.name.cmp(&b.name)));
        roots
    }

    /// Iterates over all accounts in the chart.
    pub fn iter(&self) -> impl Iterator<Item = &Account> {
        self.accounts.values()
    }
}
