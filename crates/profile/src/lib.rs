pub mod builtin;
pub mod store;
pub mod types;

pub use builtin::builtin_portfolio;
pub use store::{PROFILE_DIRECTORY_NAME, PROFILE_ENV_PREFIX, PROFILE_FILE_NAME, ProfileStore};
pub use types::{
    Achievement, ContactInfo, Education, Experience, PersonalInfo, Portfolio, Project,
    ProjectLink, Publication, SkillCategory,
};
