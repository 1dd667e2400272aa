use crate::auth::session::SessionUser;
use crate::templates::desktop_layout;
use maud::{html, Markup};

pub struct ProfileVm<'a> {
    pub user: &'a SessionUser,
    /// `/student/profile` or `/owner/profile`.
    pub base: &'a str,
    pub notice: Option<&'a str>,
    pub error: Option<&'a str>,
}

pub fn profile_page(vm: &ProfileVm<'_>) -> Markup {
    desktop_layout(
        "Profile",
        Some(vm.user),
        html! {
            main class="container narrow" {
                h1 { "My Profile" }
                p { "Signed in as " strong { (vm.user.email) } }

                @if let Some(msg) = vm.notice {
                    p class="notice" role="status" { (msg) }
                }
                @if let Some(msg) = vm.error {
                    p class="form-error" role="alert" { (msg) }
                }

                section class="card" {
                    h3 { "Personal details" }
                    form method="post" action=(vm.base) class="stacked" {
                        label for="first_name" { "First name" }
                        input type="text" id="first_name" name="first_name"
                            value=(vm.user.first_name) required;
                        label for="last_name" { "Last name" }
                        input type="text" id="last_name" name="last_name"
                            value=(vm.user.last_name);
                        button type="submit" class="primary" { "Save changes" }
                    }
                }

                section class="card" {
                    h3 { "Change password" }
                    form method="post" action=(format!("{}/password", vm.base)) class="stacked" {
                        label for="current_password" { "Current password" }
                        input type="password" id="current_password" name="current_password"
                            autocomplete="current-password" required;
                        label for="new_password" { "New password" }
                        input type="password" id="new_password" name="new_password" minlength="8"
                            autocomplete="new-password" required;
                        button type="submit" class="primary" { "Update password" }
                    }
                }
            }
        },
    )
}
