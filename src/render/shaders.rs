//! GLSL ES 3.00 sources for the shading programs.
//!
//! Both fragment programs share [`VERTEX`]. Light arrays are sized to
//! [`MAX_LIGHTS`](crate::scene::MAX_LIGHTS) and every light loop is bounded by
//! `u_numLights`.

/// Shared vertex stage: world/view/projection plus per-light direction vectors.
pub const VERTEX: &str = r#"#version 300 es
precision highp float;

in vec4 a_position;
in vec3 a_normal;
in vec4 a_color;

uniform mat4 u_projection;
uniform mat4 u_view;
uniform mat4 u_world;
uniform vec3 u_viewWorldPosition;
uniform vec3 u_lightPosition[5];
uniform highp int u_numLights;

out vec3 v_normal;
out vec3 v_surfaceToView;
out vec4 v_color;
out vec3 v_surfaceToLight[5];

void main() {
  vec4 worldPosition = u_world * a_position;
  gl_Position = u_projection * u_view * worldPosition;
  v_surfaceToView = u_viewWorldPosition - worldPosition.xyz;
  v_normal = mat3(u_world) * a_normal;
  v_color = a_color;

  for (int i = 0; i < u_numLights; i++) {
    v_surfaceToLight[i] = u_lightPosition[i] - worldPosition.xyz;
  }
}
"#;

/// Blinn-Phong with per-light colour and intensity, summed over lights.
pub const PHONG_FRAGMENT: &str = r#"#version 300 es
precision highp float;

in vec3 v_normal;
in vec3 v_surfaceToView;
in vec4 v_color;
in vec3 v_surfaceToLight[5];

uniform vec3 diffuse;
uniform vec3 emissive;
uniform vec3 ambient;
uniform vec3 specular;
uniform float shininess;
uniform float opacity;
uniform vec3 u_ambientLight;

uniform vec3 u_lightColor[5];
uniform float u_lightIntensity[5];
uniform highp int u_numLights;

out vec4 outColor;

void main() {
  vec3 normal = normalize(v_normal);
  vec3 surfaceToViewDirection = normalize(v_surfaceToView);

  vec3 diffuseColor = vec3(0.0);
  vec3 specularColor = vec3(0.0);
  for (int i = 0; i < u_numLights; i++) {
    vec3 lightDirection = normalize(v_surfaceToLight[i]);
    vec3 radiance = u_lightIntensity[i] * u_lightColor[i];

    float diffuseFactor = max(dot(normal, lightDirection), 0.0);
    diffuseColor += diffuse * diffuseFactor * radiance;

    vec3 halfVector = normalize(lightDirection + surfaceToViewDirection);
    float specularFactor = pow(max(dot(normal, halfVector), 0.0), shininess * 0.3);
    specularColor += specular * specularFactor * radiance;
  }

  vec3 finalColor = diffuseColor + specularColor + u_ambientLight * ambient + emissive;
  outColor = vec4(finalColor, opacity);
}
"#;

/// Three-band toon shading of the summed diffuse term.
pub const TOON_FRAGMENT: &str = r#"#version 300 es
precision highp float;

in vec3 v_normal;
in vec3 v_surfaceToView;
in vec4 v_color;
in vec3 v_surfaceToLight[5];

uniform vec3 u_lightColor[5];
uniform float u_lightIntensity[5];
uniform highp int u_numLights;

out vec4 outColor;

void main() {
  vec3 normal = normalize(v_normal);

  vec3 lit = vec3(0.0);
  for (int i = 0; i < u_numLights; i++) {
    vec3 lightDirection = normalize(v_surfaceToLight[i]);
    float diffuseFactor = max(dot(normal, lightDirection), 0.0);
    lit += diffuseFactor * u_lightIntensity[i];
  }

  float luminance = lit.r + lit.g + lit.b;
  float band;
  if (luminance < 0.3) {
    band = 0.0;
  } else if (luminance < 1.0) {
    band = 0.5;
  } else {
    band = 1.0;
  }

  outColor = vec4(vec3(band), 1.0);
}
"#;
