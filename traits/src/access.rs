/// Decides whether an account may perform owner-only operations.
pub trait EnsureOwner<AccountId> {
	fn is_owner(&self, who: &AccountId) -> bool;
}

/// A single fixed owner account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Owner<AccountId>(pub AccountId);

impl<AccountId: PartialEq> EnsureOwner<AccountId> for Owner<AccountId> {
	fn is_owner(&self, who: &AccountId) -> bool {
		self.0 == *who
	}
}
