use sqlx::FromRow;

pub const ORGANIZER: i32 = 1;
pub const VOLUNTEER: i32 = 2;

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Role {
    pub role_id: i32,
    pub name: String,
}

impl Role {
    pub fn seed() -> Vec<Role> {
        [(ORGANIZER, "Organizer"), (VOLUNTEER, "Volunteer")]
            .into_iter()
            .map(|(role_id, name)| Role {
                role_id,
                name: name.to_string(),
            })
            .collect()
    }

    pub fn is_known(role_id: i32) -> bool {
        role_id == ORGANIZER || role_id == VOLUNTEER
    }
}
