//! Static interaction bootstrap shipped with every compiled page.
//!
//! Instance-specific behavior is expressed through markup and styles
//! only; the script artifact is the same bytes for every compile, which
//! keeps output deterministic and side-effect-free to produce.

pub const INTERACTION_SCRIPT: &str = r##"// Pagecraft interaction bootstrap
document.addEventListener('DOMContentLoaded', function () {
  // Generic click handling for compiled buttons.
  var buttons = document.querySelectorAll('.pagecraft-button');
  buttons.forEach(function (button) {
    button.addEventListener('click', function () {
      var block = button.closest('.pagecraft-block');
      var detail = {
        blockId: block ? block.dataset.id : null,
        blockType: block ? block.dataset.type : null,
        label: button.textContent,
      };
      document.dispatchEvent(new CustomEvent('pagecraft:action', { detail: detail }));
    });
  });

  // Smooth scrolling for in-page anchors.
  document.querySelectorAll('a[href^="#"]').forEach(function (anchor) {
    anchor.addEventListener('click', function (event) {
      var target = document.querySelector(anchor.getAttribute('href'));
      if (target) {
        event.preventDefault();
        target.scrollIntoView({ behavior: 'smooth' });
      }
    });
  });
});
"##;
