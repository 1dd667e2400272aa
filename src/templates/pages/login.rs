use crate::templates::desktop_layout;
use maud::{html, Markup};

fn form_error(error: Option<&str>) -> Markup {
    html! {
        @if let Some(msg) = error {
            p class="form-error" role="alert" { (msg) }
        }
    }
}

pub fn login_page(error: Option<&str>, email: &str) -> Markup {
    desktop_layout(
        "Sign in",
        None,
        html! {
            main class="container narrow" {
                h1 { "Sign in" }
                (form_error(error))
                form method="post" action="/auth/login" class="stacked" {
                    label for="email" { "Email address" }
                    input type="email" id="email" name="email" value=(email)
                        autocomplete="email" required;
                    label for="password" { "Password" }
                    input type="password" id="password" name="password"
                        autocomplete="current-password" required;
                    button type="submit" class="primary" { "Sign in" }
                }
                p class="microcopy" { "New here? " a href="/signup" { "Create an account" } }
            }
        },
    )
}

pub fn signup_page(error: Option<&str>) -> Markup {
    desktop_layout(
        "Create account",
        None,
        html! {
            main class="container narrow" {
                h1 { "Create your account" }
                (form_error(error))
                form method="post" action="/auth/signup" class="stacked" {
                    label for="first_name" { "First name" }
                    input type="text" id="first_name" name="first_name" required;
                    label for="last_name" { "Last name" }
                    input type="text" id="last_name" name="last_name";
                    label for="email" { "Email address" }
                    input type="email" id="email" name="email" autocomplete="email" required;
                    label for="password" { "Password" }
                    input type="password" id="password" name="password" minlength="8"
                        autocomplete="new-password" required;

                    fieldset {
                        legend { "I am a" }
                        label { input type="radio" name="role" value="student" checked; " Student looking for a hostel" }
                        label { input type="radio" name="role" value="owner"; " Hostel owner" }
                    }

                    button type="submit" class="primary" { "Sign up" }
                }
                p class="microcopy" { "Already registered? " a href="/login" { "Sign in" } }
            }
        },
    )
}
