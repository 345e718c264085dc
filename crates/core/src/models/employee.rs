use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::slots::SlotAssignee;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: Uuid,
    pub company_id: Uuid,
    pub name: String,
    pub department: Option<String>,
    pub position: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Employee {
    pub fn assignee(&self) -> SlotAssignee {
        SlotAssignee {
            employee_id: Some(self.id),
            employee_name: self.name.clone(),
            employee_department: self.department.clone(),
            employee_position: self.position.clone(),
        }
    }
}
