use crate::model::{BankId, BankRecord, Dataset, FeatureId};

/// A clicked department polygon and the code it resolved to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DepartmentPick {
    pub feature: FeatureId,
    pub code: Option<String>,
}

/// Which banks the sidebar list is showing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ListScope {
    #[default]
    All,
    Department(DepartmentPick),
}

/// Exactly one of: nothing, a department (list filtered), or a bank (info shown).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    Idle,
    Department(DepartmentPick),
    /// `scope` is the list the bank was picked from; it stays on screen.
    Bank { bank: BankId, scope: ListScope },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ListView {
    Banks(Vec<BankId>),
    /// A department with no banks; the sidebar shows a placeholder message.
    Empty,
}

impl Selection {
    pub fn scope(&self) -> ListScope {
        match self {
            Selection::Idle => ListScope::All,
            Selection::Department(pick) => ListScope::Department(pick.clone()),
            Selection::Bank { scope, .. } => scope.clone(),
        }
    }

    pub fn select_bank(&self, bank: BankId) -> Selection {
        Selection::Bank {
            bank,
            scope: self.scope(),
        }
    }

    pub fn list_view(&self, data: &Dataset) -> ListView {
        match self.scope() {
            ListScope::All => ListView::Banks(data.banks.ids()),
            ListScope::Department(pick) => {
                let ids = data.banks.in_department(pick.code.as_deref());
                if ids.is_empty() {
                    ListView::Empty
                } else {
                    ListView::Banks(ids)
                }
            }
        }
    }

    pub fn active_bank(&self) -> Option<BankId> {
        match self {
            Selection::Bank { bank, .. } => Some(*bank),
            _ => None,
        }
    }

    /// Bank shown in the info panel; `None` keeps the panel hidden.
    pub fn info_bank<'a>(&self, data: &'a Dataset) -> Option<&'a BankRecord> {
        self.active_bank().and_then(|id| data.banks.get(id))
    }

    /// Polygon drawn with the emphasis style: the selected bank's department.
    pub fn emphasized_feature(&self, data: &Dataset) -> Option<FeatureId> {
        self.active_bank()
            .and_then(|id| data.department_for_bank(id))
    }

    /// Department the list is filtered to, for the sidebar heading.
    pub fn filtered_department(&self) -> Option<FeatureId> {
        match self.scope() {
            ListScope::All => None,
            ListScope::Department(pick) => Some(pick.feature),
        }
    }
}
