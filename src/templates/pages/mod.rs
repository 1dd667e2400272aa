pub mod dashboard;
pub mod home;
pub mod hostel;
pub mod login;
pub mod notifications;
pub mod profile;
pub mod search;
pub mod wishlist;

pub use dashboard::{owner_dashboard_page, student_dashboard_page, OwnerDashboardVm, StudentDashboardVm};
pub use home::home_page;
pub use hostel::{hostel_page, HostelVm};
pub use login::{login_page, signup_page};
pub use notifications::{notifications_page, NotificationsVm};
pub use profile::{profile_page, ProfileVm};
pub use search::{search_page, SearchVm};
pub use wishlist::{wishlist_page, WishlistVm};
