//! Verification email content

use fit_core::domain::entities::DEFAULT_EXPIRATION_MINUTES;

/// Subject line for the verification email
pub fn verification_subject(product_name: &str) -> String {
    format!("Confirme seu cadastro - {}", product_name)
}

/// Branded HTML body carrying the code and its lifetime
pub fn verification_html(product_name: &str, code: &str, year: i32) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
  <head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Confirme seu cadastro</title>
  </head>
  <body style="margin: 0; padding: 0; font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, Arial, sans-serif; background-color: #f8fafc;">
    <table width="100%" cellpadding="0" cellspacing="0" style="background-color: #f8fafc; padding: 40px 20px;">
      <tr>
        <td align="center">
          <table width="600" cellpadding="0" cellspacing="0" style="background-color: #ffffff; border-radius: 16px; overflow: hidden;">
            <tr>
              <td style="background: linear-gradient(135deg, #f97316 0%, #ec4899 50%, #a855f7 100%); padding: 40px 30px; text-align: center;">
                <h1 style="margin: 0; color: #ffffff; font-size: 32px;">{product}</h1>
                <p style="margin: 10px 0 0 0; color: #ffffff; font-size: 16px;">Seu personal trainer inteligente</p>
              </td>
            </tr>
            <tr>
              <td style="padding: 40px 30px;">
                <h2 style="margin: 0 0 20px 0; color: #1e293b; font-size: 24px;">Bem-vindo ao {product}!</h2>
                <p style="margin: 0 0 20px 0; color: #475569; font-size: 16px; line-height: 1.6;">
                  Para completar seu cadastro, use o código de verificação abaixo:
                </p>
                <table width="100%" cellpadding="0" cellspacing="0" style="margin: 30px 0;">
                  <tr>
                    <td align="center" style="background-color: #f1f5f9; border-radius: 12px; padding: 30px;">
                      <p style="margin: 0 0 10px 0; color: #64748b; font-size: 14px; text-transform: uppercase; letter-spacing: 1px;">Seu código de verificação</p>
                      <p style="margin: 0; color: #1e293b; font-size: 48px; font-weight: bold; letter-spacing: 8px; font-family: 'Courier New', monospace;">{code}</p>
                    </td>
                  </tr>
                </table>
                <div style="background-color: #fef3c7; border-left: 4px solid #f59e0b; padding: 16px; border-radius: 8px;">
                  <p style="margin: 0; color: #92400e; font-size: 14px; line-height: 1.6;">
                    <strong>Atenção:</strong> Este código expira em <strong>{minutes} minutos</strong>. Se você não solicitou este cadastro, ignore este email.
                  </p>
                </div>
              </td>
            </tr>
            <tr>
              <td style="background-color: #f8fafc; padding: 30px; text-align: center; border-top: 1px solid #e2e8f0;">
                <p style="margin: 0; color: #94a3b8; font-size: 12px;">&copy; {year} {product}. Todos os direitos reservados.</p>
              </td>
            </tr>
          </table>
        </td>
      </tr>
    </table>
  </body>
</html>"#,
        product = escape_html(product_name),
        code = escape_html(code),
        minutes = DEFAULT_EXPIRATION_MINUTES,
        year = year,
    )
}

fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
