//! Static translation tables.
//!
//! Every user-facing string lives here; widgets look strings up through the
//! active [`Language`]. Arabic is rendered right-to-left.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    En,
    Ar,
}

impl Language {
    pub fn is_rtl(self) -> bool {
        self == Language::Ar
    }

    pub fn toggled(self) -> Self {
        match self {
            Language::En => Language::Ar,
            Language::Ar => Language::En,
        }
    }

    pub fn strings(self) -> &'static Translations {
        match self {
            Language::En => &EN,
            Language::Ar => &AR,
        }
    }
}

pub struct Translations {
    // Titles per auth mode
    pub login_title: &'static str,
    pub login_subtitle: &'static str,
    pub signup_title: &'static str,
    pub signup_subtitle: &'static str,
    pub reset_title: &'static str,
    pub reset_subtitle: &'static str,

    // Field labels and placeholders
    pub full_name: &'static str,
    pub email: &'static str,
    pub password: &'static str,
    pub enter_full_name: &'static str,
    pub enter_email: &'static str,

    // Buttons and links
    pub login: &'static str,
    pub create_account: &'static str,
    pub send_reset_link: &'static str,
    pub processing: &'static str,
    pub forgot_password_link: &'static str,
    pub create_new_account: &'static str,
    pub have_account: &'static str,
    pub back_to_login: &'static str,

    // Validation
    pub invalid_email: &'static str,
    pub password_min: &'static str,
    pub name_min: &'static str,

    // Messages
    pub welcome_back: &'static str,
    pub login_success: &'static str,
    pub login_error: &'static str,
    pub signup_error: &'static str,
    pub account_created: &'static str,
    pub check_email_confirm: &'static str,
    pub reset_sent: &'static str,
    pub check_email_reset: &'static str,
    pub error: &'static str,
    pub warning: &'static str,
    pub not_configured: &'static str,
    pub config_warning: &'static str,
    pub account_locked: &'static str,
    /// Contains an `{n}` placeholder for the remaining attempt count
    pub attempts_remaining: &'static str,
    pub invalid_credentials: &'static str,
    pub already_registered: &'static str,

    // Settings bar
    pub light_mode: &'static str,
    pub dark_mode: &'static str,
    pub switch_language: &'static str,
}

impl Translations {
    /// Fill the `{n}` placeholder in the remaining-attempts message
    pub fn attempts_remaining_text(&self, n: u32) -> String {
        self.attempts_remaining.replace("{n}", &n.to_string())
    }
}

pub static EN: Translations = Translations {
    login_title: "Welcome Back",
    login_subtitle: "Sign in to continue",
    signup_title: "Create Account",
    signup_subtitle: "Enter your details to sign up",
    reset_title: "Reset Password",
    reset_subtitle: "Enter your email address",

    full_name: "Full Name",
    email: "Email",
    password: "Password",
    enter_full_name: "Enter your full name",
    enter_email: "example@email.com",

    login: "Login",
    create_account: "Create Account",
    send_reset_link: "Send Reset Link",
    processing: "Processing...",
    forgot_password_link: "Forgot password?",
    create_new_account: "Create new account",
    have_account: "Have an account? Login",
    back_to_login: "Back to login",

    invalid_email: "Invalid email address",
    password_min: "Password must be at least 6 characters",
    name_min: "Name must be at least 2 characters",

    welcome_back: "Welcome back!",
    login_success: "Successfully logged in",
    login_error: "Login Error",
    signup_error: "Sign Up Error",
    account_created: "Account Created!",
    check_email_confirm: "Please check your email to confirm your account",
    reset_sent: "Reset Link Sent!",
    check_email_reset: "Please check your email for the reset link",
    error: "Error",
    warning: "Warning",
    not_configured: "The identity service is not configured",
    config_warning: "Set DRAGON_GATE_AUTH_URL and DRAGON_GATE_AUTH_KEY to enable sign in",
    account_locked: "Too many attempts. Account temporarily locked",
    attempts_remaining: "{n} attempts remaining",
    invalid_credentials: "Incorrect email or password",
    already_registered: "This email is already registered",

    light_mode: "Light mode",
    dark_mode: "Dark mode",
    switch_language: "Switch to Arabic",
};

pub static AR: Translations = Translations {
    login_title: "مرحباً بك",
    login_subtitle: "سجل دخولك للمتابعة",
    signup_title: "إنشاء حساب جديد",
    signup_subtitle: "أدخل بياناتك للتسجيل",
    reset_title: "استعادة كلمة المرور",
    reset_subtitle: "أدخل بريدك الإلكتروني",

    full_name: "الاسم الكامل",
    email: "البريد الإلكتروني",
    password: "كلمة المرور",
    enter_full_name: "أدخل اسمك الكامل",
    enter_email: "example@email.com",

    login: "تسجيل الدخول",
    create_account: "إنشاء حساب",
    send_reset_link: "إرسال رابط الاستعادة",
    processing: "جاري المعالجة...",
    forgot_password_link: "نسيت كلمة المرور؟",
    create_new_account: "إنشاء حساب جديد",
    have_account: "لديك حساب؟ سجل الدخول",
    back_to_login: "العودة لتسجيل الدخول",

    invalid_email: "البريد الإلكتروني غير صالح",
    password_min: "كلمة المرور يجب أن تكون 6 أحرف على الأقل",
    name_min: "الاسم يجب أن يكون حرفين على الأقل",

    welcome_back: "مرحباً بعودتك!",
    login_success: "تم تسجيل الدخول بنجاح",
    login_error: "خطأ في تسجيل الدخول",
    signup_error: "خطأ في إنشاء الحساب",
    account_created: "تم إنشاء الحساب!",
    check_email_confirm: "يرجى التحقق من بريدك الإلكتروني لتأكيد حسابك",
    reset_sent: "تم إرسال رابط الاستعادة!",
    check_email_reset: "يرجى التحقق من بريدك الإلكتروني",
    error: "خطأ",
    warning: "تحذير",
    not_configured: "خدمة الهوية غير مُعدة",
    config_warning: "قم بتعيين DRAGON_GATE_AUTH_URL و DRAGON_GATE_AUTH_KEY لتفعيل الدخول",
    account_locked: "محاولات كثيرة. تم قفل الحساب مؤقتاً",
    attempts_remaining: "{n} محاولات متبقية",
    invalid_credentials: "البريد الإلكتروني أو كلمة المرور غير صحيحة",
    already_registered: "هذا البريد الإلكتروني مسجل بالفعل",

    light_mode: "الوضع النهاري",
    dark_mode: "الوضع الليلي",
    switch_language: "التبديل إلى الإنجليزية",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attempts_remaining_placeholder() {
        assert_eq!(EN.attempts_remaining_text(3), "3 attempts remaining");
    }

    #[test]
    fn test_rtl_flag() {
        assert!(Language::Ar.is_rtl());
        assert!(!Language::En.is_rtl());
    }
}
