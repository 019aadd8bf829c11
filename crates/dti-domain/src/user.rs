//! User domain types.

wire_enum! {
    /// User permission level.
    ///
    /// Fixed at creation in practice; no transition rules are defined.
    UserRole as "role" {
        Admin => "admin",
        Employee => "employee",
        Supervisor => "supervisor",
    }
}

wire_enum! {
    /// Account status. Only `active` accounts may log in.
    UserStatus as "status" {
        Active => "active",
        Deactivated => "deactivated",
    }
}

wire_enum! {
    Department as "department" {
        InformationTechnology => "information_technology",
        HumanResource => "human_resource",
        Finance => "finance",
    }
}

wire_enum! {
    Specialization as "specialization" {
        Technical => "technical",
        Financial => "financial",
        Supervisorial => "supervisorial",
        Hr => "hr",
        Administrative => "administrative",
    }
}

impl Default for UserRole {
    fn default() -> Self {
        Self::Employee
    }
}

impl Default for UserStatus {
    fn default() -> Self {
        Self::Active
    }
}

impl Default for Department {
    fn default() -> Self {
        Self::InformationTechnology
    }
}

impl Default for Specialization {
    fn default() -> Self {
        Self::Technical
    }
}

impl UserStatus {
    pub fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }
}
