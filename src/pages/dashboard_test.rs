use super::*;

fn doctor(name: &str) -> User {
    User {
        id: 3,
        email: "doc@clinic.test".to_owned(),
        name: name.to_owned(),
        is_doctor: true,
    }
}

#[test]
fn welcome_line_names_the_doctor() {
    assert_eq!(welcome_line(Some(&doctor("Chen"))), "Welcome back, Dr. Chen");
}

#[test]
fn welcome_line_without_a_user_stays_generic() {
    assert_eq!(welcome_line(None), "Welcome back");
}
