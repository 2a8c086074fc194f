//! Transactional email bodies, rendered as plain text + HTML pairs.

use rust_decimal::Decimal;

pub struct EmailContent {
    pub subject: String,
    pub text: String,
    pub html: String,
}

pub fn registration_otp(name: &str, code: &str) -> EmailContent {
    EmailContent {
        subject: "Your Bakehouse verification code".to_owned(),
        text: format!(
            "Hi {name},\n\n\
             Your verification code is {code}. It expires in 10 minutes.\n\n\
             If you didn't create a Bakehouse account, you can ignore this email.\n"
        ),
        html: format!(
            "<p>Hi {name},</p>\
             <p>Your verification code is <strong style=\"font-size:1.4em\">{code}</strong>. \
             It expires in 10 minutes.</p>\
             <p>If you didn't create a Bakehouse account, you can ignore this email.</p>"
        ),
    }
}

pub fn email_otp(name: &str, code: &str) -> EmailContent {
    EmailContent {
        subject: "Confirm your email address".to_owned(),
        text: format!(
            "Hi {name},\n\n\
             Use code {code} to confirm this email address. It expires in 10 minutes.\n"
        ),
        html: format!(
            "<p>Hi {name},</p>\
             <p>Use code <strong style=\"font-size:1.4em\">{code}</strong> to confirm this \
             email address. It expires in 10 minutes.</p>"
        ),
    }
}

pub fn welcome(name: &str) -> EmailContent {
    EmailContent {
        subject: "Welcome to Bakehouse".to_owned(),
        text: format!(
            "Hi {name},\n\n\
             Your account is ready. Fresh bakes are a few clicks away.\n"
        ),
        html: format!(
            "<p>Hi {name},</p>\
             <p>Your account is ready. Fresh bakes are a few clicks away.</p>"
        ),
    }
}

pub fn order_confirmation(name: &str, order_number: &str, total: Decimal) -> EmailContent {
    EmailContent {
        subject: format!("Order {order_number} confirmed"),
        text: format!(
            "Hi {name},\n\n\
             Thanks for your order! We've received {order_number} for a total of {total}.\n\
             We'll let you know when it's out for delivery.\n"
        ),
        html: format!(
            "<p>Hi {name},</p>\
             <p>Thanks for your order! We've received <strong>{order_number}</strong> \
             for a total of <strong>{total}</strong>.</p>\
             <p>We'll let you know when it's out for delivery.</p>"
        ),
    }
}
