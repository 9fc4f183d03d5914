//! 联系通知邮件模板

use super::ContactEvent;

/// 内嵌 logo 的 Content-ID
pub const LOGO_CONTENT_ID: &str = "logo";

pub fn html_escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
    out
}

pub fn render_text(event: &ContactEvent) -> String {
    format!(
        "NUEVO CONTACTO:\n\nNOMBRE: {}\nEMAIL: {}\nTELÉFONO: {}\n\nMENSAJE:\n{}\n",
        event.name, event.email, event.phone, event.message
    )
}

/// HTML 版本；`with_logo` 为 false 时不输出 `<img>`
pub fn render_html(event: &ContactEvent, with_logo: bool) -> String {
    let name = html_escape(&event.name);
    let email = html_escape(&event.email);
    let phone = html_escape(&event.phone);
    let message = html_escape(&event.message).replace('\n', "<br>");

    let logo = if with_logo {
        format!(
            r#"<img src="cid:{}" alt="Logo" style="max-width: 200px; height: auto; margin-bottom: 10px;" />"#,
            LOGO_CONTENT_ID
        )
    } else {
        String::new()
    };

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
</head>
<body style="font-family: Arial, sans-serif; margin: 0; padding: 20px; background-color: #f4f4f4;">
    <div style="max-width: 600px; margin: 0 auto; background-color: #ffffff; border-radius: 10px; overflow: hidden;">
        <div style="background-color: #B8860B; padding: 20px; text-align: center;">
            {logo}
            <p style="color: #ffffff; margin: 5px 0 0 0; font-size: 14px;">Nuevo contacto desde la web</p>
        </div>
        <div style="padding: 30px;">
            <h2 style="color: #333; border-bottom: 2px solid #B8860B; padding-bottom: 10px;">Datos del Cliente</h2>
            <table style="width: 100%; border-collapse: collapse; margin: 20px 0;">
                <tr>
                    <td style="padding: 10px; background-color: #f9f9f9; font-weight: bold; width: 30%;">Nombre:</td>
                    <td style="padding: 10px; background-color: #f9f9f9;">{name}</td>
                </tr>
                <tr>
                    <td style="padding: 10px; font-weight: bold;">Email:</td>
                    <td style="padding: 10px;"><a href="mailto:{email}" style="color: #B8860B;">{email}</a></td>
                </tr>
                <tr>
                    <td style="padding: 10px; background-color: #f9f9f9; font-weight: bold;">Teléfono:</td>
                    <td style="padding: 10px; background-color: #f9f9f9;"><a href="tel:{phone}" style="color: #B8860B;">{phone}</a></td>
                </tr>
            </table>
            <h2 style="color: #333; border-bottom: 2px solid #B8860B; padding-bottom: 10px;">Mensaje</h2>
            <div style="background-color: #f9f9f9; padding: 15px; border-radius: 5px; border-left: 4px solid #B8860B;">
                <p style="margin: 0; line-height: 1.6; color: #555;">{message}</p>
            </div>
        </div>
        <div style="background-color: #333; padding: 20px; text-align: center;">
            <p style="color: #B8860B; margin: 0; font-size: 11px;">Este correo fue generado automáticamente desde el formulario de contacto</p>
        </div>
    </div>
</body>
</html>
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event() -> ContactEvent {
        ContactEvent {
            name: "Ana <b>Ruiz</b>".into(),
            email: "ana@x.com".into(),
            phone: "0999".into(),
            message: "Hola\n\"Quiero\" viajar & más".into(),
        }
    }

    #[test]
    fn test_html_escapes_user_values() {
        let html = render_html(&event(), false);
        assert!(html.contains("Ana &lt;b&gt;Ruiz&lt;/b&gt;"));
        assert!(html.contains("&quot;Quiero&quot; viajar &amp; más"));
        assert!(html.contains("href=\"mailto:ana@x.com\""));
        assert!(html.contains("href=\"tel:0999\""));
        assert!(!html.contains("<b>"));
        assert!(!html.contains("cid:"));
    }

    #[test]
    fn test_logo_reference() {
        assert!(render_html(&event(), true).contains("src=\"cid:logo\""));
    }

    #[test]
    fn test_text_version() {
        let text = render_text(&event());
        assert!(text.starts_with("NUEVO CONTACTO:"));
        assert!(text.contains("TELÉFONO: 0999"));
    }
}
